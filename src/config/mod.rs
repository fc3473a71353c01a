//! Configuration loading, validation and shared storage.

mod loader;
mod store;
mod types;

pub use loader::{ConfigError, API_KEY_ENV, BASE_URL_ENV};
pub use store::ConfigStore;
pub use types::{ApiConfig, Config, PollingConfig};
