//! Client for the Data Automation Bot backend.
//!
//! - [`poll`]: polling data client with supersession and cancellation
//! - [`api`]: descriptors, transport, payload models and typed calls
//! - [`view`]: page state, reducers, rendering and toasts
//! - [`config`]: TOML configuration

pub mod api;
pub mod config;
pub mod logging;
pub mod poll;
pub mod view;
