//! Model-View-Intent (MVI) primitives.
//!
//! State that user actions and fetch results both change goes through an
//! explicit reducer instead of being patched in place.
//!
//! A source keeps its state behind a lock and calls [`Reducer::apply`] for
//! every intent, then publishes the new state to its subscribers.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
