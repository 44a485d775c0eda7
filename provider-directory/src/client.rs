use std::time::Duration;

use crate::{DirectoryError, DirectoryResponse, RawListing};

/// The directory never returns more than this many listings per query.
pub const MAX_LISTINGS: usize = 15;

/// Thin client for the provider directory service.
///
/// The directory is slow by nature (it aggregates several upstream listing
/// sites per query), so callers should treat `fetch_listings` as an operation
/// that can take multiple seconds or fail outright.
pub struct DirectoryClient {
    base_url: String,
    http: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch provider listings for a category ("healthcare" or "insurance")
    /// near a free-text location. At most [`MAX_LISTINGS`] rows are returned.
    pub async fn fetch_listings(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<RawListing>, DirectoryError> {
        let url = format!(
            "{}/directory/search?category={}&location={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(category),
            urlencoding::encode(location),
        );

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::ResponseError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DirectoryError::ResponseError(format!(
                "directory returned status {}",
                resp.status()
            )));
        }

        let response = resp.json::<DirectoryResponse>().await.map_err(|e| {
            DirectoryError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        let mut rows = response.into_rows()?;
        rows.truncate(MAX_LISTINGS);

        tracing::debug!(
            "Fetched {} {} listings for '{}'",
            rows.len(),
            category,
            location
        );
        Ok(rows)
    }
}
