// HTTP repository for the analysis service
use crate::application::analysis_repository::AnalysisRepository;
use crate::application::errors::{ApiError, GENERIC_FAILURE};
use crate::domain::credentials::Credentials;
use crate::domain::csv_file::CsvFile;
use crate::domain::history::{HistoryRecord, RecordId};
use crate::domain::summary::UploadResult;
use crate::infrastructure::config::{ApiSettings, endpoint_url};
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpAnalysisRepository {
    client: reqwest::Client,
    base_url: String,
}

/// Error payloads: `{"error": ...}` from the upload view, `{"detail": ...}`
/// from the framework's auth layer.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl HttpAnalysisRepository {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.basic_auth(&credentials.username, Some(&credentials.password))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    let message = e.to_string();
    if message.is_empty() {
        ApiError::Transport(GENERIC_FAILURE.to_string())
    } else {
        ApiError::Transport(message)
    }
}

fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.detail))
        .map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ApiError::Auth {
            status: status.as_u16(),
            message,
        }
    } else {
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl AnalysisRepository for HttpAnalysisRepository {
    async fn upload_csv(&self, credentials: &Credentials, file: &CsvFile) -> Result<UploadResult, ApiError> {
        let part = Part::bytes(file.contents.to_vec())
            .file_name(file.file_name.clone())
            .mime_str("text/csv")
            .map_err(transport_error)?;
        let form = Form::new().part("file", part);

        let request = self.authorized(self.client.post(self.url("upload/")), credentials);
        let response = self.send(request.multipart(form)).await?;
        Self::read_json(response).await
    }

    async fn fetch_history(&self, credentials: &Credentials) -> Result<Vec<HistoryRecord>, ApiError> {
        let request = self.authorized(self.client.get(self.url("history/")), credentials);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    async fn fetch_report(&self, credentials: &Credentials, id: &RecordId) -> Result<Bytes, ApiError> {
        let path = format!("report/{}/", urlencoding::encode(&id.to_string()));
        let request = self.authorized(self.client.get(self.url(&path)), credentials);
        let response = self.send(request).await?;

        let contents = response.bytes().await.map_err(transport_error)?;
        tracing::debug!("Fetched report {} ({} bytes)", id, contents.len());
        Ok(contents)
    }
}
