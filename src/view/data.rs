//! Data page: stored records from `/api/data` with the applied filters.

use serde_json::{Map, Value};

use crate::api::models::DataRecords;
use crate::poll::FetchState;
use crate::view::mvi::{Intent, Reducer, UiState, View};
use crate::view::remote::Remote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataState {
    pub records: Remote<DataRecords>,
}

impl UiState for DataState {}

#[derive(Debug, Clone)]
pub enum DataIntent {
    Fetched(FetchState<DataRecords>),
}

impl Intent for DataIntent {}

pub struct DataPage;

impl Reducer for DataPage {
    type State = DataState;
    type Intent = DataIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DataIntent::Fetched(fetch) => state.records.apply(fetch),
        }
        state
    }
}

impl View for DataPage {
    type State = DataState;

    fn render(state: &Self::State) -> Vec<String> {
        let mut lines = vec!["== Data ==".to_string()];
        lines.extend(state.records.banner());

        let Some(records) = state.records.data() else {
            return lines;
        };

        lines.push(format!(
            "{} records (type: {}, last {} days, limit {})",
            records.count,
            records.filters.data_type.as_deref().unwrap_or("all"),
            records.filters.days,
            records.filters.limit
        ));
        lines.extend(records.data.iter().map(record_line));
        lines
    }
}

fn record_line(record: &Map<String, Value>) -> String {
    let text = |key: &str| match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    };
    let rest: Map<String, Value> = record
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "timestamp" | "data_type"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    format!(
        "{:<20} {:<12} {}",
        text("timestamp"),
        text("data_type"),
        Value::Object(rest)
    )
}
