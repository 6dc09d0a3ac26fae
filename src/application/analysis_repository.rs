// Repository trait for the remote analysis service
use crate::application::errors::ApiError;
use crate::domain::credentials::Credentials;
use crate::domain::csv_file::CsvFile;
use crate::domain::history::{HistoryRecord, RecordId};
use crate::domain::summary::UploadResult;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Upload a CSV as multipart field `file` and return the computed summary
    async fn upload_csv(&self, credentials: &Credentials, file: &CsvFile) -> Result<UploadResult, ApiError>;

    /// List upload records, newest first
    async fn fetch_history(&self, credentials: &Credentials) -> Result<Vec<HistoryRecord>, ApiError>;

    /// Fetch the PDF report generated for one upload
    async fn fetch_report(&self, credentials: &Credentials, id: &RecordId) -> Result<Bytes, ApiError>;
}

/// Local destination for downloaded reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn save(&self, file_name: &str, contents: Bytes) -> std::io::Result<PathBuf>;
}
