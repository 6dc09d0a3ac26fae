// Saves downloaded reports into a local directory
use crate::application::analysis_repository::ReportSink;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirectoryReportSink {
    directory: PathBuf,
}

impl DirectoryReportSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl ReportSink for DirectoryReportSink {
    async fn save(&self, file_name: &str, contents: Bytes) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(file_name);
        tokio::fs::write(&path, &contents).await?;
        Ok(path)
    }
}
