use super::intent::Intent;
use super::state::UiState;

/// `(state, intent) -> state`, the only place a reducer's state changes.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Fold `intent` into `state`. Must not have side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Reduce a state held behind a lock or a `&mut` without cloning it.
    fn apply(state: &mut Self::State, intent: Self::Intent) {
        let current = std::mem::take(state);
        *state = Self::reduce(current, intent);
    }
}
