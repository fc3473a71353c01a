use crate::view::mvi::{Reducer, View};
use crate::view::reports::intent::ReportsIntent;
use crate::view::reports::state::ReportsState;

pub struct ReportsPage;

impl Reducer for ReportsPage {
    type State = ReportsState;
    type Intent = ReportsIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ReportsIntent::Fetched(fetch) => state.reports.apply(fetch),
            ReportsIntent::Generated(Ok(response)) => {
                state.last_message = Some(match response.filename {
                    Some(filename) => format!("{} ({})", response.message, filename),
                    None => response.message,
                });
            }
            ReportsIntent::Generated(Err(e)) => {
                state.last_message =
                    Some(format!("Report generation failed: {}", e.user_message()));
            }
        }
        state
    }
}

impl View for ReportsPage {
    type State = ReportsState;

    fn render(state: &Self::State) -> Vec<String> {
        let mut lines = vec!["== Reports ==".to_string()];
        lines.extend(state.reports.banner());

        if state.reports.data().is_some() {
            let reports = state.newest_first();
            if reports.is_empty() {
                lines.push("No reports generated yet".to_string());
            }
            for report in reports {
                lines.push(format!(
                    "{:<40} {:>10}  {}",
                    report.filename,
                    format_size(report.size),
                    report.modified
                ));
            }
        }

        if let Some(message) = &state.last_message {
            lines.push(message.clone());
        }
        lines
    }
}

/// Human-readable byte count: "0 Bytes", "500 Bytes", "1.5 KB", "2 MB".
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ActionResponse, ReportList};
    use crate::api::FetchError;
    use crate::poll::FetchState;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(500), "500 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn test_reports_sorted_newest_first() {
        let list: ReportList = serde_json::from_str(
            r#"{"reports":[
                {"filename":"old.csv","size":10,"created":"2024-01-01T00:00:00","modified":"2024-01-01T00:00:00"},
                {"filename":"new.html","size":2048,"created":"2024-03-01T00:00:00","modified":"2024-03-01T00:00:00"}
            ]}"#,
        )
        .unwrap();
        let state = ReportsPage::reduce(
            ReportsState::default(),
            ReportsIntent::Fetched(FetchState::Success(list)),
        );
        let lines = ReportsPage::render(&state);
        assert!(lines[1].starts_with("new.html"));
        assert!(lines[1].contains("2 KB"));
        assert!(lines[2].starts_with("old.csv"));
    }

    #[test]
    fn test_generate_outcomes() {
        let state = ReportsPage::reduce(
            ReportsState::default(),
            ReportsIntent::Generated(Ok(ActionResponse {
                message: "Report generated successfully".to_string(),
                success: Some(true),
                filename: Some("daily_report.csv".to_string()),
            })),
        );
        assert_eq!(
            state.last_message.as_deref(),
            Some("Report generated successfully (daily_report.csv)")
        );

        let state = ReportsPage::reduce(
            state,
            ReportsIntent::Generated(Err(FetchError::Network {
                message: "connection refused".to_string(),
            })),
        );
        assert_eq!(
            state.last_message.as_deref(),
            Some("Report generation failed: Cannot reach server: connection refused")
        );
    }

    #[test]
    fn test_empty_list_message() {
        let state = ReportsPage::reduce(
            ReportsState::default(),
            ReportsIntent::Fetched(FetchState::Success(ReportList { reports: vec![] })),
        );
        assert_eq!(
            ReportsPage::render(&state),
            vec!["== Reports ==", "No reports generated yet"]
        );
    }
}
