//! Model-View-Intent (MVI) primitives.
//!
//! Unidirectional data flow for the storefront views.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ ViewState ──→ Presentation
//!    ↑                                               │
//!    └───────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable model; replaced wholesale on every transition
//! - **Intent**: Commands from presentation or completions from background tasks
//! - **Reducer**: Pure `(State, Intent) -> State` transition

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
