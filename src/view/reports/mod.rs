//! Reports page: generated report files and report generation results.

mod intent;
mod reducer;
mod state;

pub use intent::ReportsIntent;
pub use reducer::{format_size, ReportsPage};
pub use state::ReportsState;
