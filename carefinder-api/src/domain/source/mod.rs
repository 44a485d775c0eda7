mod directory;
mod mock;

pub use directory::DirectoryDataSource;
pub use mock::MockDataSource;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ProviderRecord, ProviderType};

/// Best-effort estimate of how many listings one fetch yields.
pub const DEFAULT_ESTIMATED_TOTAL: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("directory request failed: {0}")]
    Directory(#[from] provider_directory::DirectoryError),
    #[error("listing consumer went away")]
    ChannelClosed,
}

/// The black-box listing retrieval behind the provider cache.
///
/// `fetch` streams each listing through `sink` as soon as it is known, so the
/// refresh job can expose partial results while the fetch is still running.
/// The call may take seconds or fail outright; `fallback_listings` supplies
/// the deterministic substitute set committed after a failure.
#[async_trait]
pub trait ProviderDataSource: Send + Sync {
    async fn fetch(
        &self,
        provider_type: ProviderType,
        location: &str,
        sink: mpsc::Sender<ProviderRecord>,
    ) -> Result<(), DataSourceError>;

    fn fallback_listings(&self, provider_type: ProviderType, location: &str)
        -> Vec<ProviderRecord>;

    fn estimated_total(&self) -> usize {
        DEFAULT_ESTIMATED_TOTAL
    }
}
