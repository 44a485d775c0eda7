//! Background refresh coordination: one single-flight job per
//! (provider type, location) key, with live progress for pollers.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, watch, RwLock, Semaphore};

use super::cache::CacheStore;
use super::source::ProviderDataSource;
use super::{ProviderRecord, SourceKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    NotStarted,
    Scraping,
    Complete,
    Failed,
}

/// Per-key job record. Listings are appended as the data source yields them,
/// so pollers can observe partial results before completion. The record
/// persists after completion until a new refresh for the same key resets it.
#[derive(Debug)]
pub struct RefreshJob {
    pub state: RefreshState,
    pub records: Vec<ProviderRecord>,
    pub progress: usize,
    pub total: usize,
}

impl RefreshJob {
    fn idle() -> Self {
        Self {
            state: RefreshState::NotStarted,
            records: Vec::new(),
            progress: 0,
            total: 0,
        }
    }
}

/// Snapshot of a job handed to progress pollers.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshProgress {
    pub status: RefreshState,
    pub providers: Vec<ProviderRecord>,
    pub progress: usize,
    pub total: usize,
}

impl RefreshProgress {
    fn not_started() -> Self {
        Self {
            status: RefreshState::NotStarted,
            providers: Vec::new(),
            progress: 0,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Started,
    AlreadyInProgress,
}

struct JobEntry {
    job: Arc<RwLock<RefreshJob>>,
    state_tx: watch::Sender<RefreshState>,
}

impl JobEntry {
    fn new() -> Self {
        let (state_tx, _) = watch::channel(RefreshState::NotStarted);
        Self {
            job: Arc::new(RwLock::new(RefreshJob::idle())),
            state_tx,
        }
    }
}

enum Begin {
    Started {
        job: Arc<RwLock<RefreshJob>>,
        state_tx: watch::Sender<RefreshState>,
    },
    InFlight {
        state_rx: watch::Receiver<RefreshState>,
    },
}

/// Ensures at most one in-flight refresh per key and commits results to the
/// cache store. Jobs are fire-and-forget tokio tasks; no handle escapes and
/// cancellation is not supported. A semaphore bounds how many fetches run at
/// once.
pub struct RefreshCoordinator {
    store: Arc<CacheStore>,
    source: Arc<dyn ProviderDataSource>,
    jobs: RwLock<HashMap<SourceKey, JobEntry>>,
    permits: Arc<Semaphore>,
}

impl RefreshCoordinator {
    pub(crate) fn new(
        store: Arc<CacheStore>,
        source: Arc<dyn ProviderDataSource>,
        max_concurrent: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            source,
            jobs: RwLock::new(HashMap::new()),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        })
    }

    /// Start a background refresh for `key`. If one is already scraping this
    /// is a no-op reporting [`RefreshOutcome::AlreadyInProgress`].
    pub async fn request_refresh(self: &Arc<Self>, key: SourceKey) -> RefreshOutcome {
        match self.begin(&key).await {
            Begin::InFlight { .. } => {
                tracing::debug!("Refresh for {} already in progress", key);
                RefreshOutcome::AlreadyInProgress
            }
            Begin::Started { job, state_tx } => {
                let this = Arc::clone(self);
                tokio::spawn(async move {
                    this.run(key, job, state_tx).await;
                });
                RefreshOutcome::Started
            }
        }
    }

    /// Run a refresh for `key` and return once it has settled. If another
    /// refresh is already in flight, wait for that one instead of starting a
    /// duplicate.
    pub(crate) async fn refresh_and_wait(self: &Arc<Self>, key: SourceKey) {
        match self.begin(&key).await {
            Begin::Started { job, state_tx } => {
                Arc::clone(self).run(key, job, state_tx).await;
            }
            Begin::InFlight { mut state_rx } => {
                let _ = state_rx
                    .wait_for(|state| *state != RefreshState::Scraping)
                    .await;
            }
        }
    }

    pub async fn progress(&self, key: &SourceKey) -> RefreshProgress {
        let jobs = self.jobs.read().await;
        match jobs.get(key) {
            Some(entry) => {
                let job = entry.job.read().await;
                RefreshProgress {
                    status: job.state,
                    providers: job.records.clone(),
                    progress: job.progress,
                    total: job.total,
                }
            }
            None => RefreshProgress::not_started(),
        }
    }

    pub async fn is_scraping(&self, key: &SourceKey) -> bool {
        self.progress(key).await.status == RefreshState::Scraping
    }

    /// Claim the key for a new refresh, or report the in-flight one. This is
    /// the single-flight gate: the state check and the transition to
    /// `Scraping` happen under the job's write lock.
    async fn begin(&self, key: &SourceKey) -> Begin {
        let mut jobs = self.jobs.write().await;
        let entry = jobs.entry(key.clone()).or_insert_with(JobEntry::new);

        let mut job = entry.job.write().await;
        if job.state == RefreshState::Scraping {
            return Begin::InFlight {
                state_rx: entry.state_tx.subscribe(),
            };
        }

        *job = RefreshJob {
            state: RefreshState::Scraping,
            records: Vec::new(),
            progress: 0,
            total: self.source.estimated_total(),
        };
        entry.state_tx.send_replace(RefreshState::Scraping);

        Begin::Started {
            job: Arc::clone(&entry.job),
            state_tx: entry.state_tx.clone(),
        }
    }

    #[tracing::instrument(name = "RefreshCoordinator::run", skip(self, job, state_tx), fields(key = %key))]
    async fn run(
        self: Arc<Self>,
        key: SourceKey,
        job: Arc<RwLock<RefreshJob>>,
        state_tx: watch::Sender<RefreshState>,
    ) {
        let _permit = self
            .permits
            .acquire()
            .await
            .expect("refresh semaphore closed");
        tracing::info!("Starting refresh for {}", key);

        let (tx, mut rx) = mpsc::channel(16);
        let fetch = self.source.fetch(key.provider_type, &key.location, tx);
        let append = async {
            while let Some(record) = rx.recv().await {
                let mut job = job.write().await;
                job.records.push(record);
                job.progress += 1;
            }
        };

        let (result, ()) = tokio::join!(fetch, append);

        let final_state = match result {
            Ok(()) => {
                let records = job.read().await.records.clone();
                self.store.commit(key.clone(), records.clone()).await;

                let mut job = job.write().await;
                job.state = RefreshState::Complete;
                job.total = job.progress;
                tracing::info!("Committed {} listings for {}", records.len(), key);
                RefreshState::Complete
            }
            Err(err) => {
                tracing::warn!("Refresh for {} failed: {}", key, err);
                let fallback = self
                    .source
                    .fallback_listings(key.provider_type, &key.location);
                self.store.commit(key.clone(), fallback.clone()).await;

                let mut job = job.write().await;
                job.progress = fallback.len();
                job.total = fallback.len();
                job.records = fallback;
                job.state = RefreshState::Failed;
                RefreshState::Failed
            }
        };

        state_tx.send_replace(final_state);
    }
}
