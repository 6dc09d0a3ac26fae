// History synchronizer - Keeps the latest upload records in step with the session
use crate::application::analysis_repository::{AnalysisRepository, ReportSink};
use crate::application::errors::{DownloadError, FetchError, ValidationError};
use crate::domain::credentials::Credentials;
use crate::domain::history::{HistoryRecord, RecordId, latest_records};
use crate::domain::report::report_file_name;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPhase {
    #[default]
    Empty,
    Loading,
    Loaded,
}

/// Snapshot of the held history. Replaced as a whole, never patched in place
/// from outside the synchronizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryView {
    pub phase: HistoryPhase,
    pub records: Vec<HistoryRecord>,
    pub last_error: Option<String>,
}

pub struct HistorySynchronizer {
    repository: Arc<dyn AnalysisRepository>,
    sink: Arc<dyn ReportSink>,
    /// Token of the most recent trigger; responses carrying an older token are dropped
    latest_token: AtomicU64,
    view: watch::Sender<HistoryView>,
}

impl HistorySynchronizer {
    pub fn new(repository: Arc<dyn AnalysisRepository>, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            repository,
            sink,
            latest_token: AtomicU64::new(0),
            view: watch::channel(HistoryView::default()).0,
        }
    }

    pub fn view(&self) -> HistoryView {
        self.view.borrow().clone()
    }

    pub fn records(&self) -> Vec<HistoryRecord> {
        self.view.borrow().records.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HistoryView> {
        self.view.subscribe()
    }

    /// Fetch and hold the newest records for `credentials`.
    ///
    /// Incomplete credentials clear the held list without a request. A fetch
    /// that is overtaken by a later trigger returns [`FetchError::Superseded`]
    /// and leaves the held list alone.
    pub async fn refresh(&self, credentials: &Credentials) -> Result<Vec<HistoryRecord>, FetchError> {
        match self.begin(credentials) {
            Some(token) => self.complete(token, credentials).await,
            None => Ok(Vec::new()),
        }
    }

    /// Drop the held list and invalidate any fetch still in flight.
    pub fn clear(&self) {
        self.begin(&Credentials::default());
    }

    // Claims a token synchronously so trigger order, not completion order, wins
    fn begin(&self, credentials: &Credentials) -> Option<u64> {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        if !credentials.is_complete() {
            self.view.send_replace(HistoryView::default());
            return None;
        }
        self.view.send_modify(|view| view.phase = HistoryPhase::Loading);
        Some(token)
    }

    async fn complete(&self, token: u64, credentials: &Credentials) -> Result<Vec<HistoryRecord>, FetchError> {
        let fetched = self.repository.fetch_history(credentials).await;

        let mut outcome = Err(FetchError::Superseded);
        self.view.send_if_modified(|view| {
            // Checked under the channel lock so a newer trigger cannot interleave
            if self.latest_token.load(Ordering::SeqCst) != token {
                return false;
            }
            match fetched {
                Ok(records) => {
                    let kept = latest_records(records);
                    view.records = kept.clone();
                    view.phase = HistoryPhase::Loaded;
                    view.last_error = None;
                    outcome = Ok(kept);
                }
                Err(e) => {
                    let err = FetchError::Api(e);
                    view.phase = if view.records.is_empty() {
                        HistoryPhase::Empty
                    } else {
                        HistoryPhase::Loaded
                    };
                    view.last_error = Some(err.user_message());
                    outcome = Err(err);
                }
            }
            true
        });

        match &outcome {
            Ok(records) => tracing::debug!("History refreshed with {} records", records.len()),
            Err(FetchError::Superseded) => tracing::debug!("Discarding stale history response (token {})", token),
            Err(e) => tracing::warn!("{}", e),
        }
        outcome
    }

    fn trigger(self: &Arc<Self>, credentials: Credentials) {
        if let Some(token) = self.begin(&credentials) {
            let sync = Arc::clone(self);
            tokio::spawn(async move {
                // Errors are already logged and recorded in the view by `complete`
                let _ = sync.complete(token, &credentials).await;
            });
        }
    }

    /// Re-fetch whenever the credentials change or the refresh signal advances
    /// while credentials are present. Runs until either sender is dropped.
    pub fn spawn(
        self: &Arc<Self>,
        mut credentials: watch::Receiver<Credentials>,
        mut signal: watch::Receiver<u64>,
    ) -> JoinHandle<()> {
        let sync = Arc::clone(self);
        tokio::spawn(async move {
            let initial = credentials.borrow_and_update().clone();
            let _ = signal.borrow_and_update();
            if initial.is_complete() {
                sync.trigger(initial);
            }

            loop {
                tokio::select! {
                    changed = credentials.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let current = credentials.borrow_and_update().clone();
                        sync.trigger(current);
                    }
                    changed = signal.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let generation = *signal.borrow_and_update();
                        let current = credentials.borrow().clone();
                        if current.is_complete() {
                            tracing::debug!("Refresh signal {} received, re-fetching history", generation);
                            sync.trigger(current);
                        }
                    }
                }
            }
            tracing::debug!("History sync stopped");
        })
    }

    /// Fetch the PDF report for one record and save it as `<sanitized>_report.pdf`.
    pub async fn download_report(
        &self,
        id: &RecordId,
        file_name: &str,
        credentials: &Credentials,
    ) -> Result<PathBuf, DownloadError> {
        if !credentials.is_complete() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let target = report_file_name(file_name);
        let contents = match self.repository.fetch_report(credentials, id).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Report {} download failed: {}", id, e);
                return Err(e.into());
            }
        };

        let size = contents.len();
        let path = self.sink.save(&target, contents).await.map_err(|e| {
            tracing::warn!("Could not save report {}: {}", target, e);
            DownloadError::Save {
                file_name: target.clone(),
                message: e.to_string(),
            }
        })?;

        tracing::info!("Saved report {} ({} bytes) to {}", id, size, path.display());
        Ok(path)
    }
}
