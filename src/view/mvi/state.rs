//! Base trait for view models in MVI architecture.

/// Marker trait for view model state.
///
/// States are cloned to derive new ones and compared to detect
/// changes; they must be shareable across tasks.
pub trait UiState: Clone + PartialEq + Send + Sync + 'static {}
