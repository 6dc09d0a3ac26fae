// History list view models
use crate::application::history_synchronizer::{HistoryPhase, HistoryView};
use crate::domain::history::RecordId;
use crate::domain::report::report_file_name;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub id: RecordId,
    pub file_name: String,
    pub uploaded_label: String,
    pub report_file_name: String,
}

pub fn to_history_rows(view: &HistoryView) -> Vec<HistoryRow> {
    view.records
        .iter()
        .map(|record| HistoryRow {
            id: record.id.clone(),
            file_name: record.display_name().to_string(),
            uploaded_label: format!("Uploaded: {}", record.uploaded_on()),
            report_file_name: report_file_name(record.display_name()),
        })
        .collect()
}

/// Status line shown above the list, if any.
pub fn history_notice(view: &HistoryView) -> Option<String> {
    if let Some(error) = &view.last_error {
        return Some(error.clone());
    }
    match view.phase {
        HistoryPhase::Loading => Some("Loading history...".to_string()),
        HistoryPhase::Loaded if view.records.is_empty() => Some("No history found.".to_string()),
        _ => None,
    }
}
