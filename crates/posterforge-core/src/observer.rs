use crate::PosterState;
use std::sync::Arc;

/// Trait for observing state transitions (logging, UI redraw).
///
/// The engine publishes a snapshot after every committed mutation; the
/// subscriber redraws from the snapshot rather than reaching into the
/// engine's state.
pub trait StateObserver: Send + Sync {
    /// Called with the freshly committed state.
    fn on_transition(&self, state: &PosterState);
}

pub type ObserverPtr = Arc<dyn StateObserver>;
