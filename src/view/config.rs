//! Config page: the backend's effective configuration.

use serde_json::{Map, Value};

use crate::api::models::ConfigSnapshot;
use crate::poll::FetchState;
use crate::view::mvi::{Intent, Reducer, UiState, View};
use crate::view::remote::Remote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigState {
    pub config: Remote<ConfigSnapshot>,
}

impl UiState for ConfigState {}

#[derive(Debug, Clone)]
pub enum ConfigIntent {
    Fetched(FetchState<ConfigSnapshot>),
}

impl Intent for ConfigIntent {}

pub struct ConfigPage;

impl Reducer for ConfigPage {
    type State = ConfigState;
    type Intent = ConfigIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ConfigIntent::Fetched(fetch) => state.config.apply(fetch),
        }
        state
    }
}

impl View for ConfigPage {
    type State = ConfigState;

    fn render(state: &Self::State) -> Vec<String> {
        let mut lines = vec!["== Configuration ==".to_string()];
        lines.extend(state.config.banner());

        let Some(config) = state.config.data() else {
            return lines;
        };

        lines.push(format!("Output directory: {}", config.reporting.output_dir));
        lines.push(format!("Default format:   {}", config.reporting.default_format));

        render_section(&mut lines, "api", &config.api);
        render_section(&mut lines, "database", &config.database);
        render_section(&mut lines, "scheduler", &config.scheduler);
        if let Some(processing) = &config.data_processing {
            render_section(&mut lines, "data_processing", processing);
        }
        lines
    }
}

fn render_section(lines: &mut Vec<String>, name: &str, section: &Map<String, Value>) {
    if section.is_empty() {
        return;
    }
    lines.push(format!("[{}]", name));
    for (key, value) in section {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("  {} = {}", key, value));
    }
}
