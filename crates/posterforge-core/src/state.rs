//! Generation state published by the engine.

use crate::PosterConfig;
use serde::Serialize;

/// Progress marker for one generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStep {
    /// Initial state, and the state an error resets to.
    Idle,
    /// The analysis call is in flight.
    Analyzing,
    /// The background image call is in flight.
    GeneratingImage,
    /// Both calls succeeded.
    Complete,
}

/// Snapshot of the engine's single source of truth.
///
/// Mutated only by the engine; observers and the renderer receive clones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosterState {
    /// Design brief from the analysis call, if one has been obtained.
    pub config: Option<PosterConfig>,

    /// Generated background as a data URI, if one has been obtained.
    pub background_image_url: Option<String>,

    /// True while a generation cycle is in flight.
    pub is_loading: bool,

    /// Human-readable failure message from the last cycle.
    pub error: Option<String>,

    /// Current progress marker.
    pub step: GenerationStep,
}

impl Default for PosterState {
    fn default() -> Self {
        Self {
            config: None,
            background_image_url: None,
            is_loading: false,
            error: None,
            step: GenerationStep::Idle,
        }
    }
}

impl PosterState {
    /// Structural invariants every committed snapshot must satisfy:
    /// a complete cycle carries a config, and an idle error state is
    /// never still loading.
    pub fn invariants_hold(&self) -> bool {
        if self.step == GenerationStep::Complete && self.config.is_none() {
            return false;
        }
        if self.step == GenerationStep::Idle && self.error.is_some() && self.is_loading {
            return false;
        }
        true
    }
}
