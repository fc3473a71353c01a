//! Model-View-Intent (MVI) primitives for the page views.
//!
//! # Architecture
//!
//! ```text
//! FetchState / action result ──→ Intent ──→ Reducer ──→ State ──→ View::render
//! ```
//!
//! - **State**: self-contained snapshot of one page
//! - **Intent**: fetched data, action results, user selections
//! - **Reducer**: pure function that transforms state based on intents
//! - **View**: pure mapping from state to output lines

mod intent;
mod reducer;
mod state;
mod view;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
pub use view::View;
