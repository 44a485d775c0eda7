//! Mock data source for testing cache and refresh behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Semaphore};

use super::{DataSourceError, ProviderDataSource};
use crate::domain::{ProviderRecord, ProviderType, RecordSource};

/// Mock source with configurable listings, failure mode, and an optional gate
/// that holds `fetch` open after all listings are sent, for observing a job
/// mid-flight.
pub struct MockDataSource {
    records: Vec<ProviderRecord>,
    fail: bool,
    gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl MockDataSource {
    /// Always yields the given listings.
    pub fn returning(records: Vec<ProviderRecord>) -> Self {
        Self {
            records,
            fail: false,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every fetch fails; callers should see fallback listings instead.
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sends all listings, then blocks until a permit is added to `gate`.
    pub fn gated(records: Vec<ProviderRecord>, gate: Arc<Semaphore>) -> Self {
        Self {
            records,
            fail: false,
            gate: Some(gate),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `fetch` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A small deterministic listing set for tests.
    pub fn sample_records(count: usize) -> Vec<ProviderRecord> {
        (0..count)
            .map(|idx| {
                let mut record = ProviderRecord::new(
                    format!("Mock Clinic {idx}"),
                    format!("{} Mock Street, Miami, FL", 100 + idx),
                    format!("(305) 555-{:04}", 2000 + idx),
                    format!("https://mock-clinic-{idx}.com"),
                    RecordSource::Scraped("Mock Directory".to_string()),
                );
                record.rating = Some(4.0);
                record.distance = Some(idx as f64 + 0.5);
                record
            })
            .collect()
    }
}

#[async_trait]
impl ProviderDataSource for MockDataSource {
    async fn fetch(
        &self,
        _provider_type: ProviderType,
        _location: &str,
        sink: mpsc::Sender<ProviderRecord>,
    ) -> Result<(), DataSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(DataSourceError::Directory(
                provider_directory::DirectoryError::ResponseError("mock failure".to_string()),
            ));
        }

        for record in self.records.clone() {
            sink.send(record)
                .await
                .map_err(|_| DataSourceError::ChannelClosed)?;
        }

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }
        Ok(())
    }

    fn fallback_listings(
        &self,
        _provider_type: ProviderType,
        location: &str,
    ) -> Vec<ProviderRecord> {
        vec![ProviderRecord::new(
            "Fallback Clinic",
            format!("1 Fallback Way, {location}"),
            "(305) 555-9999",
            "https://fallback-clinic.com",
            RecordSource::Fallback,
        )]
    }

    fn estimated_total(&self) -> usize {
        self.records.len().max(1)
    }
}
