//! Poster provider trait and configuration.
//!
//! Defines the interface a remote AI backend must implement: one call
//! that turns text into a design brief, and one that turns the brief's
//! image prompt into a background image. The engine takes the provider
//! by value, so tests substitute [`MockProvider`] without touching
//! process environment state.

use crate::{PosterConfig, PosterError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default model for the text-analysis call.
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";

/// Default model for the image-synthesis call.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Configuration for a remote AI provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Model used for the analysis call.
    pub analysis_model: String,

    /// Model used for the image call.
    pub image_model: String,

    /// Base URL for the API. Overridden in tests.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl ProviderConfig {
    /// Create a provider config with an API key and default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: None,
            timeout_seconds: None,
        }
    }

    /// Set the analysis model.
    pub fn with_analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = model.into();
        self
    }

    /// Set the image model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Load config from environment variables.
    ///
    /// Expected variables:
    /// - `GEMINI_API_KEY` or `GOOGLE_API_KEY`
    /// - `POSTERFORGE_ANALYSIS_MODEL` (optional)
    /// - `POSTERFORGE_IMAGE_MODEL` (optional)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                PosterError::Config("GEMINI_API_KEY or GOOGLE_API_KEY must be set".to_string())
            })?;

        let mut config = Self::new(api_key);

        if let Ok(model) = std::env::var("POSTERFORGE_ANALYSIS_MODEL") {
            config = config.with_analysis_model(model);
        }
        if let Ok(model) = std::env::var("POSTERFORGE_IMAGE_MODEL") {
            config = config.with_image_model(model);
        }

        Ok(config)
    }
}

/// Trait that remote AI backends must implement.
///
/// Both operations are single-attempt: no retry, no streaming. The
/// engine decides what a failure means for the UI state.
#[async_trait]
pub trait PosterProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Turn raw user text into a design brief.
    ///
    /// Fails with [`PosterError::AnalysisFailed`] when the remote reply
    /// carries no text payload or the payload does not match the
    /// [`PosterConfig`] schema.
    async fn analyze_text(&self, text: &str) -> Result<PosterConfig>;

    /// Turn a descriptive prompt into a background image data URI.
    ///
    /// Fails with [`PosterError::NoImage`] when no inline image part is
    /// present in the reply.
    async fn generate_background(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is available and configured correctly.
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

/// A mock provider for testing.
///
/// Unset responses double as failure injection: a missing config yields
/// `AnalysisFailed`, a missing image yields `NoImage`.
#[derive(Debug, Default)]
pub struct MockProvider {
    /// Canned analysis result.
    pub config: Option<PosterConfig>,

    /// Canned image data URI.
    pub image_url: Option<String>,
}

impl MockProvider {
    /// Create a mock provider with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned analysis result.
    pub fn with_config(mut self, config: PosterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the canned image data URI.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

#[async_trait]
impl PosterProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze_text(&self, _text: &str) -> Result<PosterConfig> {
        self.config.clone().ok_or(PosterError::AnalysisFailed)
    }

    async fn generate_background(&self, _prompt: &str) -> Result<String> {
        self.image_url.clone().ok_or(PosterError::NoImage)
    }
}
