use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One raw provider listing as returned by the directory service.
///
/// Fields the directory does not know for a given listing are simply absent;
/// callers decide how to present them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub coverage_types: Vec<String>,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "Provider Directory".to_string()
}

/// Generic response envelope from the directory service. Contains a list of
/// rows and a boolean indicating whether the request was successful.
#[derive(Debug, Deserialize)]
pub struct DirectoryResponse {
    pub success: bool,
    pub rows: Vec<RawListing>,
}

impl DirectoryResponse {
    pub fn into_rows(self) -> Result<Vec<RawListing>, DirectoryError> {
        if self.success {
            Ok(self.rows)
        } else {
            Err(DirectoryError::ResponseError(
                "directory reported an unsuccessful query".to_string(),
            ))
        }
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_deserializes_with_missing_optionals() {
        let listing: RawListing = serde_json::from_str(
            r#"{
                "name": "Baptist Health",
                "address": "100 Medical Plaza, Miami, FL",
                "phone": "(305) 555-1000",
                "website": "https://baptisthealth.com"
            }"#,
        )
        .unwrap();

        assert_eq!(listing.name, "Baptist Health");
        assert!(listing.rating.is_none());
        assert!(listing.coverage_types.is_empty());
        assert_eq!(listing.source, "Provider Directory");
    }

    #[test]
    fn unsuccessful_response_is_an_error() {
        let response = DirectoryResponse {
            success: false,
            rows: vec![],
        };

        assert!(response.into_rows().is_err());
    }
}
