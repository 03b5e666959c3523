//! # PosterForge AI
//!
//! AI provider implementations for the PosterForge poster designer.
//!
//! Currently one backend: Google Gemini, which serves both the
//! text-analysis and the image-synthesis call.
//!
//! ## Example
//!
//! ```rust,ignore
//! use posterforge_ai::GeminiClient;
//! use posterforge_core::PosterEngine;
//!
//! // One-line initialization from environment
//! let provider = GeminiClient::from_env()?;
//!
//! let engine = PosterEngine::new(provider);
//! let state = engine.generate("Jazz Night").await;
//! ```

pub mod gemini;

pub use gemini::GeminiClient;

/// Re-export core types for convenience.
pub use posterforge_core::{
    PosterConfig, PosterEngine, PosterError, PosterProvider, ProviderConfig, Result,
};

/// Create a Gemini client with a single line.
///
/// # Example
///
/// ```rust,ignore
/// let provider = posterforge_ai::gemini("AIza...")?;
/// ```
pub fn gemini(api_key: &str) -> Result<GeminiClient> {
    GeminiClient::new(ProviderConfig::new(api_key))
}
