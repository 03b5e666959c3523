//! Poster design brief: the structured output of the analysis call.
//!
//! The remote service is asked for JSON matching these types exactly.
//! Font and layout are closed enums, so an out-of-vocabulary value from
//! the model is a deserialization error rather than a silent fallback.

use crate::{PosterError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Pattern a palette entry must match. Accepts #RGB through #RRGGBBAA.
const HEX_COLOR_PATTERN: &str = r"^#[0-9a-fA-F]{3,8}$";

static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_REGEX.get_or_init(|| Regex::new(HEX_COLOR_PATTERN).expect("Invalid hex color regex"))
}

/// Four-color palette for one poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Dominant color.
    pub primary: String,

    /// Secondary color.
    pub secondary: String,

    /// Accent color used for decorative elements.
    pub accent: String,

    /// Headline text color, expected to contrast with primary/secondary.
    pub text: String,
}

impl ColorPalette {
    /// Check that every entry is a hex color string.
    pub fn validate(&self) -> Result<()> {
        for color in [&self.primary, &self.secondary, &self.accent, &self.text] {
            if !hex_color_regex().is_match(color) {
                return Err(PosterError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }
}

/// Typography style for the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosterFont {
    #[serde(rename = "font-modern")]
    Modern,
    #[serde(rename = "font-display")]
    Display,
    #[serde(rename = "font-serif")]
    Serif,
    #[serde(rename = "font-handwritten")]
    Handwritten,
    #[serde(rename = "font-classic")]
    Classic,
}

impl PosterFont {
    /// CSS class name used by the preview document.
    pub fn css_class(&self) -> &'static str {
        match self {
            PosterFont::Modern => "font-modern",
            PosterFont::Display => "font-display",
            PosterFont::Serif => "font-serif",
            PosterFont::Handwritten => "font-handwritten",
            PosterFont::Classic => "font-classic",
        }
    }

    /// Human-readable style name, e.g. for the design-analysis summary.
    pub fn label(&self) -> &'static str {
        match self {
            PosterFont::Modern => "modern",
            PosterFont::Display => "display",
            PosterFont::Serif => "serif",
            PosterFont::Handwritten => "handwritten",
            PosterFont::Classic => "classic",
        }
    }
}

/// Text placement template applied to the poster canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PosterLayout {
    Centered,
    BottomHeavy,
    TopHeavy,
    Split,
}

/// The complete design brief produced by the analysis call.
///
/// Immutable once received; the engine owns it for one generation cycle
/// and replaces it wholesale on the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterConfig {
    /// Prompt for the background image model. The analysis instruction
    /// requires it to forbid literal text inside the image.
    pub image_prompt: String,

    /// Four-color palette.
    pub color_palette: ColorPalette,

    /// Typography style.
    pub font_style: PosterFont,

    /// Text placement template.
    pub layout: PosterLayout,

    /// Short free-form mood summary.
    pub mood_description: String,
}

impl PosterConfig {
    /// Validate the palette entries.
    pub fn validate(&self) -> Result<()> {
        self.color_palette.validate()
    }
}
