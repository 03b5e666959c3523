//! Poster engine: the state machine driving one generation cycle.
//!
//! The engine runs the two provider calls strictly in sequence
//! (`idle -> analyzing -> generating_image -> complete`), commits a state
//! snapshot after each stage, and publishes every committed snapshot to
//! its observers. Any failure resets the step to `idle` with a
//! human-readable message.

use crate::{
    observer::ObserverPtr, GenerationStep, PosterError, PosterProvider, PosterState,
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Message shown when an error carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str =
    "Failed to generate poster. Please check your API key and try again.";

/// The state machine orchestrating the analysis and image calls.
///
/// # Example
///
/// ```rust,ignore
/// use posterforge_core::PosterEngine;
/// use posterforge_ai::GeminiClient;
///
/// let provider = GeminiClient::from_env()?;
/// let engine = PosterEngine::new(provider);
///
/// let state = engine.generate("Jazz Night").await;
/// assert!(state.error.is_none());
/// ```
pub struct PosterEngine<P: PosterProvider> {
    /// The AI provider performing both remote calls.
    provider: Arc<P>,

    /// Single source of truth for the UI.
    state: Mutex<PosterState>,

    /// Subscribers notified with a snapshot after every commit.
    observers: Vec<ObserverPtr>,
}

impl<P: PosterProvider + 'static> PosterEngine<P> {
    /// Create a new engine with the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            state: Mutex::new(PosterState::default()),
            observers: Vec::new(),
        }
    }

    /// Register a state observer.
    pub fn with_observer(mut self, observer: ObserverPtr) -> Self {
        self.observers.push(observer);
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PosterState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one generation cycle and return the final state.
    ///
    /// Empty or whitespace-only input is a no-op, as is a trigger
    /// arriving while a cycle is already in flight. Failures never
    /// propagate as `Err`; they land in the returned state's `error`.
    #[instrument(skip(self, text))]
    pub async fn generate(&self, text: &str) -> PosterState {
        if text.trim().is_empty() {
            debug!("Ignoring generation trigger with empty input");
            return self.state();
        }

        // Clear the previous error and enter `analyzing`, or bail if a
        // cycle is already running. Checked and committed under one lock.
        let snapshot = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.is_loading {
                debug!("Generation already in flight; ignoring trigger");
                return state.clone();
            }
            state.error = None;
            state.is_loading = true;
            state.step = GenerationStep::Analyzing;
            state.clone()
        };
        self.notify(&snapshot);

        info!("Analyzing text with provider '{}'", self.provider.name());
        let config = match self.provider.analyze_text(text).await {
            Ok(config) => config,
            Err(error) => return self.fail(error),
        };

        let image_prompt = config.image_prompt.clone();
        self.commit(|state| {
            state.config = Some(config);
            state.step = GenerationStep::GeneratingImage;
        });

        info!("Creating background art");
        match self.provider.generate_background(&image_prompt).await {
            Ok(url) => self.commit(|state| {
                state.background_image_url = Some(url);
                state.is_loading = false;
                state.step = GenerationStep::Complete;
            }),
            // The already-fetched config stays in place so the design
            // brief survives an image-stage failure.
            Err(error) => self.fail(error),
        }
    }

    /// Mutate the state under the lock and publish the snapshot.
    fn commit<F: FnOnce(&mut PosterState)>(&self, mutate: F) -> PosterState {
        let snapshot = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            mutate(&mut state);
            debug_assert!(state.invariants_hold());
            state.clone()
        };
        self.notify(&snapshot);
        snapshot
    }

    /// Abort the cycle: clear loading, surface the message, reset to idle.
    fn fail(&self, error: PosterError) -> PosterState {
        warn!("Generation failed: {error}");
        let message = error.to_string();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        self.commit(|state| {
            state.is_loading = false;
            state.error = Some(message);
            state.step = GenerationStep::Idle;
        })
    }

    fn notify(&self, snapshot: &PosterState) {
        for observer in &self.observers {
            observer.on_transition(snapshot);
        }
    }
}
