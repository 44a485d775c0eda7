use async_trait::async_trait;
use provider_directory::{DirectoryClient, RawListing};
use tokio::sync::mpsc;

use super::{DataSourceError, ProviderDataSource};
use crate::domain::{ProviderRecord, ProviderType, RecordSource};

/// Production data source backed by the provider directory service.
pub struct DirectoryDataSource {
    client: DirectoryClient,
}

impl DirectoryDataSource {
    pub fn new(client: DirectoryClient) -> Self {
        Self { client }
    }
}

fn into_record(listing: RawListing, source: RecordSource) -> ProviderRecord {
    ProviderRecord {
        name: listing.name,
        address: listing.address,
        phone: listing.phone,
        website: listing.website,
        rating: listing.rating,
        distance: listing.distance,
        source,
        coverage_types: listing.coverage_types,
        specialties: Vec::new(),
        accepted_insurance: Vec::new(),
        description: listing.description,
        relevance_score: None,
    }
}

#[async_trait]
impl ProviderDataSource for DirectoryDataSource {
    async fn fetch(
        &self,
        provider_type: ProviderType,
        location: &str,
        sink: mpsc::Sender<ProviderRecord>,
    ) -> Result<(), DataSourceError> {
        let listings = self
            .client
            .fetch_listings(&provider_type.to_string(), location)
            .await?;

        for listing in listings {
            let source = RecordSource::Scraped(listing.source.clone());
            sink.send(into_record(listing, source))
                .await
                .map_err(|_| DataSourceError::ChannelClosed)?;
        }
        Ok(())
    }

    fn fallback_listings(
        &self,
        provider_type: ProviderType,
        location: &str,
    ) -> Vec<ProviderRecord> {
        let listings = match provider_type {
            ProviderType::Healthcare => provider_directory::fallback_healthcare_listings(location),
            ProviderType::Insurance => provider_directory::fallback_insurance_listings(location),
        };

        listings
            .into_iter()
            .map(|listing| into_record(listing, RecordSource::Fallback))
            .collect()
    }
}
