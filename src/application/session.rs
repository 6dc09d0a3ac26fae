// Session - Wires credentials, uploads and history together
use crate::application::analysis_repository::{AnalysisRepository, ReportSink};
use crate::application::credential_holder::CredentialHolder;
use crate::application::errors::{DownloadError, FetchError, UploadError};
use crate::application::history_synchronizer::{HistoryPhase, HistorySynchronizer};
use crate::application::upload_orchestrator::{UploadOrchestrator, UploadStatus};
use crate::domain::credentials::Credentials;
use crate::domain::csv_file::CsvFile;
use crate::domain::history::HistoryRecord;
use crate::domain::summary::SummaryData;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub auth: AuthState,
    pub upload: UploadStatus,
    pub history: HistoryPhase,
}

pub struct Session {
    credentials: CredentialHolder,
    uploads: UploadOrchestrator,
    history: Arc<HistorySynchronizer>,
}

impl Session {
    pub fn new(repository: Arc<dyn AnalysisRepository>, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            credentials: CredentialHolder::default(),
            uploads: UploadOrchestrator::new(repository.clone()),
            history: Arc::new(HistorySynchronizer::new(repository, sink)),
        }
    }

    /// Start the background task that keeps history in step with credential
    /// changes and completed uploads.
    pub fn start(&self) -> JoinHandle<()> {
        self.history
            .spawn(self.credentials.subscribe(), self.uploads.signal().subscribe())
    }

    pub fn credentials(&self) -> &CredentialHolder {
        &self.credentials
    }

    pub fn uploads(&self) -> &UploadOrchestrator {
        &self.uploads
    }

    pub fn history(&self) -> &Arc<HistorySynchronizer> {
        &self.history
    }

    /// Operator input. Any change drops the held history and any upload still
    /// in flight under the previous credentials.
    pub fn set_credentials(&self, credentials: Credentials) -> bool {
        if self.credentials.current() == credentials {
            return false;
        }
        // Before notifying, so the sync loop's fetch is not invalidated by this clear
        self.uploads.invalidate();
        self.history.clear();
        self.credentials.set(credentials)
    }

    pub async fn upload(&self, file: Option<&CsvFile>) -> Result<SummaryData, UploadError> {
        let credentials = self.credentials.current();
        self.uploads.upload(file, &credentials).await
    }

    pub async fn refresh_history(&self) -> Result<Vec<HistoryRecord>, FetchError> {
        let credentials = self.credentials.current();
        self.history.refresh(&credentials).await
    }

    pub async fn download_report(&self, record: &HistoryRecord) -> Result<PathBuf, DownloadError> {
        let credentials = self.credentials.current();
        self.history
            .download_report(&record.id, record.display_name(), &credentials)
            .await
    }

    pub fn latest_summary(&self) -> Option<SummaryData> {
        self.uploads.latest_summary()
    }

    pub fn state(&self) -> SessionState {
        let auth = if self.credentials.current().is_complete() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        SessionState {
            auth,
            upload: self.uploads.status(),
            history: self.history.view().phase,
        }
    }
}
