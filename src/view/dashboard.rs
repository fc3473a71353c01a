//! Dashboard page: system status KPIs from `/api/status`.

use crate::api::models::StatusReport;
use crate::poll::FetchState;
use crate::view::mvi::{Intent, Reducer, UiState, View};
use crate::view::remote::Remote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub status: Remote<StatusReport>,
}

impl UiState for DashboardState {}

#[derive(Debug, Clone)]
pub enum DashboardIntent {
    StatusFetched(FetchState<StatusReport>),
}

impl Intent for DashboardIntent {}

pub struct DashboardPage;

impl Reducer for DashboardPage {
    type State = DashboardState;
    type Intent = DashboardIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DashboardIntent::StatusFetched(fetch) => state.status.apply(fetch),
        }
        state
    }
}

impl View for DashboardPage {
    type State = DashboardState;

    fn render(state: &Self::State) -> Vec<String> {
        let mut lines = vec!["== Dashboard ==".to_string()];
        lines.extend(state.status.banner());

        let Some(status) = state.status.data() else {
            if state.status.banner().is_none() {
                lines.push("No data yet".to_string());
            }
            return lines;
        };

        lines.push(kpi("Total records", status.database.total_records));
        lines.push(kpi("Records (24h)", status.database.recent_24h));

        let scheduler = if status.scheduler.running {
            format!("running ({} jobs)", status.scheduler.jobs_count)
        } else {
            "stopped".to_string()
        };
        lines.push(kpi("Scheduler", scheduler));

        let api = if status.api.configured {
            format!("configured ({})", status.api.base_url)
        } else {
            "not configured".to_string()
        };
        lines.push(kpi("API", api));

        if let Some(notifications) = &status.notifications {
            lines.push(kpi("Notifications", format!("{} unread", notifications.unread)));
        }
        if let Some(timestamp) = &status.timestamp {
            lines.push(kpi("Updated", timestamp));
        }
        lines
    }
}

fn kpi(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<16}{}", format!("{}:", label), value)
}
