//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;
pub mod scripted_transport;

use automation_dash::poll::FetchState;
use parking_lot::Mutex;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// A sample `/api/status` body with 42 records and a running scheduler.
pub const STATUS_BODY: &str = r#"{
    "timestamp": "2024-05-01T12:00:00",
    "database": {"total_records": 42, "recent_24h": 7},
    "scheduler": {"running": true, "jobs_count": 2, "jobs": [
        {"id": "daily_report", "next_run": "2024-05-02T08:00:00"},
        {"id": "weekly_report", "next_run": null}
    ]},
    "api": {"configured": true, "base_url": "https://api.example.com"},
    "notifications": {"unread": 3}
}"#;

/// Records every state a subscription emits.
#[derive(Clone)]
pub struct StateRecorder<T> {
    states: Arc<Mutex<Vec<FetchState<T>>>>,
}

impl<T: Clone + Send + 'static> StateRecorder<T> {
    pub fn new() -> Self {
        Self {
            states: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Callback to hand to `PollingClient::subscribe`.
    pub fn callback(&self) -> impl Fn(FetchState<T>) + Send + Sync + 'static {
        let states = Arc::clone(&self.states);
        move |state| states.lock().push(state)
    }

    pub fn states(&self) -> Vec<FetchState<T>> {
        self.states.lock().clone()
    }

    pub fn last(&self) -> Option<FetchState<T>> {
        self.states.lock().last().cloned()
    }

    pub fn successes(&self) -> Vec<T> {
        self.states
            .lock()
            .iter()
            .filter_map(|s| s.payload().cloned())
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.states
            .lock()
            .iter()
            .filter(|s| matches!(s, FetchState::Failure(_)))
            .count()
    }
}
