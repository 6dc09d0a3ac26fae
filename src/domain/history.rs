// Upload history records
use chrono::{DateTime, FixedOffset};
use crate::domain::summary::null_as_default;
use serde::Deserialize;
use std::fmt;

/// Number of records the client keeps from a history response.
pub const HISTORY_LIMIT: usize = 5;

/// Shown in place of a field the server left out.
pub const UNKNOWN_FIELD: &str = "N/A";

/// Server-assigned identifier; numeric on the wire today but treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Number(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        match id.parse::<u64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploaded_at: String,
}

impl HistoryRecord {
    pub fn new(id: impl Into<RecordId>, file_name: impl Into<String>, uploaded_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            uploaded_at: uploaded_at.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.file_name.is_empty() {
            UNKNOWN_FIELD
        } else {
            &self.file_name
        }
    }

    pub fn uploaded_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.uploaded_at).ok()
    }

    /// Calendar date of the upload, falling back to the raw prefix when the
    /// timestamp is not RFC 3339.
    pub fn uploaded_on(&self) -> String {
        if self.uploaded_at.is_empty() {
            return UNKNOWN_FIELD.to_string();
        }
        match self.uploaded_at_parsed() {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => self.uploaded_at.chars().take(10).collect(),
        }
    }
}

/// Keep the newest `HISTORY_LIMIT` records, assuming newest-first input.
pub fn latest_records(mut records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    records.truncate(HISTORY_LIMIT);
    records
}
