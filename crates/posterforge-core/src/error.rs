//! Error types for PosterForge Core.

use thiserror::Error;

/// Result type alias for PosterForge operations.
pub type Result<T> = std::result::Result<T, PosterError>;

/// Main error type for the PosterForge pipeline.
#[derive(Debug, Error)]
pub enum PosterError {
    /// The analysis call produced no usable poster configuration.
    #[error("Failed to analyze text.")]
    AnalysisFailed,

    /// The image call returned no inline image part.
    #[error("No image generated.")]
    NoImage,

    /// A palette color did not look like a hex color.
    #[error("Palette color '{0}' is not a hex color")]
    InvalidColor(String),

    /// AI provider returned an error.
    #[error("AI provider error: {0}")]
    Provider(String),

    /// Network request failed.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Preview rendering failed.
    #[error("Render error: {0}")]
    Render(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
