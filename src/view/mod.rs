//! View-state layer: MVI primitives, the home flow model and the
//! projector that publishes snapshots to presentation.

pub mod home;
pub mod mvi;
pub mod projector;

pub use home::ViewState;
pub use projector::{ProjectorHandle, ViewStateProjector};
