use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Connection settings for the automation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:5000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-attempt timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Pool idle timeout in seconds (default: 90).
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_seconds: u32,
    /// Max idle connections per host (default: 8).
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: u32,
}

/// Refresh cadence of the polled pages. Zero disables polling for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_dashboard_interval")]
    pub dashboard_interval_seconds: u64,
    #[serde(default = "default_jobs_interval")]
    pub jobs_interval_seconds: u64,
    #[serde(default = "default_config_interval")]
    pub config_interval_seconds: u64,
    #[serde(default = "default_data_interval")]
    pub data_interval_seconds: u64,
    /// Suspend polling while a page is not visible.
    #[serde(default = "default_pause_when_hidden")]
    pub pause_when_hidden: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_pool_idle_timeout() -> u32 {
    90
}

fn default_pool_max_idle_per_host() -> u32 {
    8
}

fn default_dashboard_interval() -> u64 {
    30
}

fn default_jobs_interval() -> u64 {
    30
}

fn default_config_interval() -> u64 {
    120
}

fn default_data_interval() -> u64 {
    60
}

fn default_pause_when_hidden() -> bool {
    true
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.pool_idle_timeout_seconds))
    }
}

impl PollingConfig {
    pub fn dashboard_interval(&self) -> Option<Duration> {
        interval_from_secs(self.dashboard_interval_seconds)
    }

    pub fn jobs_interval(&self) -> Option<Duration> {
        interval_from_secs(self.jobs_interval_seconds)
    }

    pub fn config_interval(&self) -> Option<Duration> {
        interval_from_secs(self.config_interval_seconds)
    }

    pub fn data_interval(&self) -> Option<Duration> {
        interval_from_secs(self.data_interval_seconds)
    }
}

fn interval_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            pool_idle_timeout_seconds: default_pool_idle_timeout(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            dashboard_interval_seconds: default_dashboard_interval(),
            jobs_interval_seconds: default_jobs_interval(),
            config_interval_seconds: default_config_interval(),
            data_interval_seconds: default_data_interval(),
            pause_when_hidden: default_pause_when_hidden(),
        }
    }
}
