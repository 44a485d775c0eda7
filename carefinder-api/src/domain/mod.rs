mod cache;
mod classifier;
mod knowledge;
mod local_db;
mod orchestrator;
mod provider;
mod ranking;
mod refresh;
mod review;
mod source;
mod source_key;
mod symptoms;
mod user_location;

pub use cache::ProviderCache;
pub use classifier::{classify, QueryIntent};
pub use knowledge::KnowledgeBase;
pub use local_db::LocalDatabase;
pub use orchestrator::{SearchOrchestrator, SearchOutcome, SearchScope};
pub use provider::{ProviderRecord, ProviderType, RecordSource};
pub use ranking::{rank_clinics, MAX_RESULTS};
pub use refresh::{RefreshCoordinator, RefreshOutcome, RefreshProgress, RefreshState};
pub use review::{Review, ReviewStore};
pub use source::{DataSourceError, DirectoryDataSource, MockDataSource, ProviderDataSource};
pub use source_key::SourceKey;
pub use symptoms::{SymptomAnalysis, SymptomAnalyzer, Urgency};
pub use user_location::{ClientLocation, LocationStore};
