//! Intents (commands and completions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Presentation commands (refresh, search input)
/// - Background completions (catalog fetched, favorites changed)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
