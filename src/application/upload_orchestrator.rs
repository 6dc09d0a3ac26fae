// Upload orchestrator - Validated, single-flight CSV upload
use crate::application::analysis_repository::AnalysisRepository;
use crate::application::errors::{UploadError, ValidationError};
use crate::application::refresh_signal::RefreshSignal;
use crate::domain::credentials::Credentials;
use crate::domain::csv_file::CsvFile;
use crate::domain::summary::SummaryData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Succeeded,
    Failed(String),
    /// Input was rejected before any request was made
    Rejected(String),
}

impl UploadStatus {
    pub fn message(&self) -> Option<String> {
        match self {
            UploadStatus::Idle => None,
            UploadStatus::Uploading => Some("Uploading...".to_string()),
            UploadStatus::Succeeded => Some("Upload Successful!".to_string()),
            UploadStatus::Failed(msg) | UploadStatus::Rejected(msg) => Some(msg.clone()),
        }
    }
}

pub struct UploadOrchestrator {
    repository: Arc<dyn AnalysisRepository>,
    in_flight: AtomicBool,
    /// Bumped whenever the session's credentials change; results from an older value are dropped
    session_generation: AtomicU64,
    status: watch::Sender<UploadStatus>,
    latest_summary: watch::Sender<Option<SummaryData>>,
    signal: RefreshSignal,
}

// Clears the in-flight flag however the upload future ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UploadOrchestrator {
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self {
            repository,
            in_flight: AtomicBool::new(false),
            session_generation: AtomicU64::new(0),
            status: watch::channel(UploadStatus::Idle).0,
            latest_summary: watch::channel(None).0,
            signal: RefreshSignal::new(),
        }
    }

    /// Credentials are checked before the file.
    pub fn validate<'a>(
        file: Option<&'a CsvFile>,
        credentials: &Credentials,
    ) -> Result<&'a CsvFile, ValidationError> {
        if !credentials.is_complete() {
            return Err(ValidationError::MissingCredentials);
        }
        let file = file.ok_or(ValidationError::MissingFile)?;
        if !file.has_csv_extension() {
            return Err(ValidationError::UnsupportedFile {
                file_name: file.file_name.clone(),
            });
        }
        Ok(file)
    }

    pub async fn upload(&self, file: Option<&CsvFile>, credentials: &Credentials) -> Result<SummaryData, UploadError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Ignoring upload request while another upload is in flight");
            return Err(UploadError::InFlight);
        };

        let file = match Self::validate(file, credentials) {
            Ok(file) => file,
            Err(e) => {
                self.status.send_replace(UploadStatus::Rejected(e.to_string()));
                return Err(e.into());
            }
        };

        let generation = self.session_generation.load(Ordering::SeqCst);
        self.status.send_replace(UploadStatus::Uploading);
        tracing::info!("Uploading {} ({} bytes)", file.file_name, file.contents.len());

        let outcome = self.repository.upload_csv(credentials, file).await;
        if self.session_generation.load(Ordering::SeqCst) != generation {
            tracing::info!("Discarding upload result for {}: credentials changed", file.file_name);
            self.status.send_replace(UploadStatus::Idle);
            return Err(UploadError::Discarded);
        }

        match outcome {
            Ok(result) => {
                let summary = result.summary_data;
                // Summary must be visible before observers see the signal
                self.latest_summary.send_replace(Some(summary.clone()));
                self.status.send_replace(UploadStatus::Succeeded);
                let refresh = self.signal.advance();
                tracing::info!(
                    "Upload of {} analyzed: {} rows, refresh generation {}",
                    file.file_name,
                    summary.total_count,
                    refresh
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!("Upload of {} failed: {}", file.file_name, e);
                let err = UploadError::Api(e);
                self.status.send_replace(UploadStatus::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    /// Mark any upload still in flight as stale. Its response will not be applied.
    pub fn invalidate(&self) {
        self.session_generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    pub fn latest_summary(&self) -> Option<SummaryData> {
        self.latest_summary.borrow().clone()
    }

    pub fn signal(&self) -> &RefreshSignal {
        &self.signal
    }

    pub fn subscribe_status(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }
}
