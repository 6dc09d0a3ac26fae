// In-memory fakes for service tests
use crate::application::analysis_repository::{AnalysisRepository, ReportSink};
use crate::application::errors::ApiError;
use crate::domain::credentials::Credentials;
use crate::domain::csv_file::CsvFile;
use crate::domain::history::{HistoryRecord, RecordId};
use crate::domain::summary::{Averages, SummaryData, TypeCount, UploadResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

/// A scripted response, optionally held back until the test releases it.
pub struct Scripted<T> {
    pub gate: Option<oneshot::Receiver<()>>,
    pub result: Result<T, ApiError>,
}

impl<T> Scripted<T> {
    pub fn ready(result: Result<T, ApiError>) -> Self {
        Self { gate: None, result }
    }

    pub fn gated(result: Result<T, ApiError>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { gate: Some(rx), result }, tx)
    }

    async fn resolve(self) -> Result<T, ApiError> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.result
    }
}

pub struct FakeRepository {
    pub upload_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub report_calls: AtomicUsize,
    uploads: Mutex<VecDeque<Scripted<UploadResult>>>,
    histories: Mutex<VecDeque<Scripted<Vec<HistoryRecord>>>>,
    default_history: Mutex<Result<Vec<HistoryRecord>, ApiError>>,
    report: Mutex<Result<Bytes, ApiError>>,
    seen_credentials: Mutex<Vec<Credentials>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self {
            upload_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            report_calls: AtomicUsize::new(0),
            uploads: Mutex::new(VecDeque::new()),
            histories: Mutex::new(VecDeque::new()),
            default_history: Mutex::new(Ok(Vec::new())),
            report: Mutex::new(Ok(Bytes::from_static(b"%PDF-1.4"))),
            seen_credentials: Mutex::new(Vec::new()),
        }
    }

    pub fn push_upload(&self, scripted: Scripted<UploadResult>) {
        self.uploads.lock().unwrap().push_back(scripted);
    }

    pub fn push_history(&self, scripted: Scripted<Vec<HistoryRecord>>) {
        self.histories.lock().unwrap().push_back(scripted);
    }

    pub fn set_default_history(&self, result: Result<Vec<HistoryRecord>, ApiError>) {
        *self.default_history.lock().unwrap() = result;
    }

    pub fn set_report(&self, result: Result<Bytes, ApiError>) {
        *self.report.lock().unwrap() = result;
    }

    pub fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn history_fetches(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn reports(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }

    pub fn seen_credentials(&self) -> Vec<Credentials> {
        self.seen_credentials.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisRepository for FakeRepository {
    async fn upload_csv(&self, credentials: &Credentials, _file: &CsvFile) -> Result<UploadResult, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_credentials.lock().unwrap().push(credentials.clone());
        let scripted = self
            .uploads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::ready(Ok(UploadResult { summary_data: scenario_summary() })));
        scripted.resolve().await
    }

    async fn fetch_history(&self, credentials: &Credentials) -> Result<Vec<HistoryRecord>, ApiError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_credentials.lock().unwrap().push(credentials.clone());
        let scripted = self.histories.lock().unwrap().pop_front();
        if let Some(scripted) = scripted {
            return scripted.resolve().await;
        }
        let fallback = self.default_history.lock().unwrap().clone();
        fallback
    }

    async fn fetch_report(&self, credentials: &Credentials, _id: &RecordId) -> Result<Bytes, ApiError> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_credentials.lock().unwrap().push(credentials.clone());
        let report = self.report.lock().unwrap().clone();
        report
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub saved: Mutex<Vec<(String, Bytes)>>,
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn save(&self, file_name: &str, contents: Bytes) -> std::io::Result<PathBuf> {
        self.saved.lock().unwrap().push((file_name.to_string(), contents));
        Ok(PathBuf::from(file_name))
    }
}

pub fn scenario_summary() -> SummaryData {
    SummaryData {
        total_count: 7,
        averages: Averages {
            flowrate: Some(12.5),
            pressure: Some(3.0),
            temperature: Some(88.1),
        },
        type_distribution: vec![TypeCount::new("Pump", 4), TypeCount::new("Valve", 3)],
    }
}

pub fn records(count: u64) -> Vec<HistoryRecord> {
    (0..count)
        .map(|i| {
            HistoryRecord::new(
                100 - i,
                format!("run_{}.csv", 100 - i),
                format!("2024-05-{:02}T08:00:00Z", 28 - i),
            )
        })
        .collect()
}

pub fn operator() -> Credentials {
    Credentials::new("op", "pw")
}
