//! # PosterForge Core
//!
//! Core library for the PosterForge poster designer.
//!
//! The hard work (text analysis, image synthesis) is delegated to a
//! remote AI provider behind the [`PosterProvider`] trait. This crate
//! supplies everything around it:
//!
//! - The [`PosterConfig`] design brief and its closed font/layout enums
//! - The [`PosterEngine`] state machine driving the two remote calls
//! - An observer contract for state snapshots
//! - A deterministic scene renderer and a handlebars HTML view
//!
//! ## Example
//!
//! ```rust,ignore
//! use posterforge_core::{PosterEngine, render, PosterView};
//!
//! let engine = PosterEngine::new(provider);
//! let state = engine.generate("Jazz Night").await;
//!
//! let scene = render(
//!     "Jazz Night",
//!     state.config.as_ref(),
//!     state.background_image_url.as_deref(),
//!     state.is_loading,
//! );
//! let html = PosterView::new()?.render_html(&scene)?;
//! ```

pub mod engine;
pub mod error;
pub mod observer;
pub mod poster;
pub mod provider;
pub mod render;
pub mod state;
pub mod view;

pub use engine::{PosterEngine, FALLBACK_ERROR_MESSAGE};
pub use error::{PosterError, Result};
pub use observer::{ObserverPtr, StateObserver};
pub use poster::{ColorPalette, PosterConfig, PosterFont, PosterLayout};
pub use provider::{MockProvider, PosterProvider, ProviderConfig};
pub use render::{render, PosterScene, FALLBACK_BACKGROUND_URL};
pub use state::{GenerationStep, PosterState};
pub use view::PosterView;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        GenerationStep, PosterConfig, PosterEngine, PosterError, PosterProvider, PosterScene,
        PosterState, PosterView, ProviderConfig, Result, StateObserver,
    };
}
