//! Jobs page: scheduled jobs with pause/resume actions.

mod intent;
mod reducer;
mod state;

pub use intent::JobsIntent;
pub use reducer::JobsPage;
pub use state::JobsState;
