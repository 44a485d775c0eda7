use std::sync::Arc;
use std::time::Duration;

use provider_directory::DirectoryClient;

use crate::{
    config::Settings,
    domain::{
        DirectoryDataSource, KnowledgeBase, LocalDatabase, LocationStore, ProviderCache,
        ProviderDataSource, ReviewStore, SearchOrchestrator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub cache: ProviderCache,
    pub knowledge: Arc<KnowledgeBase>,
    pub orchestrator: Arc<SearchOrchestrator>,
    pub local_db: Arc<LocalDatabase>,
    pub reviews: Arc<ReviewStore>,
    pub locations: Arc<LocationStore>,
}

impl AppState {
    pub fn new(config: &Settings) -> Self {
        let client = DirectoryClient::new(
            config.directory.base_url.clone(),
            Duration::from_secs(config.directory.timeout_seconds),
        );
        let source = Arc::new(DirectoryDataSource::new(client));
        Self::with_source(source, config)
    }

    /// Build the state around any data source. Tests use this with a mock.
    pub fn with_source(source: Arc<dyn ProviderDataSource>, config: &Settings) -> Self {
        let cache = ProviderCache::new(
            source,
            Duration::from_secs(config.cache.ttl_seconds),
            config.cache.max_concurrent_refreshes,
        );
        let knowledge = Arc::new(KnowledgeBase::new());
        let local_db = Arc::new(LocalDatabase::new());
        let orchestrator = Arc::new(SearchOrchestrator::new(
            cache.clone(),
            Arc::clone(&knowledge),
            Arc::clone(&local_db),
        ));

        Self {
            cache,
            knowledge,
            orchestrator,
            local_db,
            reviews: Arc::new(ReviewStore::new()),
            locations: Arc::new(LocationStore::new()),
        }
    }
}
