use crate::api::models::{ReportFile, ReportList};
use crate::view::mvi::UiState;
use crate::view::remote::Remote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportsState {
    pub reports: Remote<ReportList>,
    /// Outcome of the most recent generate request.
    pub last_message: Option<String>,
}

impl UiState for ReportsState {}

impl ReportsState {
    /// Reports ordered newest first by modification time.
    pub fn newest_first(&self) -> Vec<&ReportFile> {
        let mut reports: Vec<&ReportFile> = self
            .reports
            .data()
            .map(|list| list.reports.iter().collect())
            .unwrap_or_default();
        // ISO 8601 timestamps sort lexically
        reports.sort_by(|a, b| b.modified.cmp(&a.modified));
        reports
    }
}
