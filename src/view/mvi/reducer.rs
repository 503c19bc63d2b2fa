//! Pure state transitions for view models.

use super::intent::Intent;
use super::state::UiState;

/// Folds intents into a view model.
///
/// The projector loop owns the model and calls `reduce` once per
/// intent, so transitions are applied one at a time in arrival order.
/// Implementations do no I/O and never touch the favorites store.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    /// Next model after `intent`. The previous model is consumed.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
