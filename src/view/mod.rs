//! Page views: state, reducers and rendering for each page, plus the
//! runner that wires a page to the polling client.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod jobs;
pub mod mvi;
pub mod products;
mod remote;
pub mod reports;
pub mod runner;
pub mod toast;

pub use remote::Remote;
pub use runner::{watch, PageRunner};
pub use toast::{Toast, ToastLevel, Toasts};
