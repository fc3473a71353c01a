//! Base trait for page state in MVI architecture.

/// Marker trait for page state objects.
///
/// States should be:
/// - Owned by the page controller, never global
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
