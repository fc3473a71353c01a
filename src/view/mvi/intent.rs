//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Completed fetches (a new `FetchState`)
/// - Results of actions such as pausing a job
/// - User selections
pub trait Intent: Send + 'static {}
