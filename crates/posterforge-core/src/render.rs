//! Poster scene construction.
//!
//! `render` is a pure function of (text, config, image URL, loading flag):
//! identical inputs always produce an identical [`PosterScene`], and no
//! input is ever mutated. The scene is plain data; turning it into HTML
//! is the view's job.

use crate::poster::{PosterConfig, PosterLayout};
use serde::Serialize;

/// Background used when no generated image is available.
pub const FALLBACK_BACKGROUND_URL: &str = "https://picsum.photos/800/1200?grayscale&blur=2";

/// Placeholder copy for the empty state.
pub const EMPTY_STATE_MESSAGE: &str = "Enter text to generate your poster";

/// Placeholder copy for the loading skeleton.
pub const SKELETON_MESSAGE: &str = "Generating Art...";

/// What the preview shows for a given state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PosterScene {
    /// Nothing generated yet and nothing in flight.
    Empty { message: String },

    /// A cycle is in flight but no design brief has arrived.
    Skeleton { message: String },

    /// A design brief is available; render the full poster.
    Canvas(PosterCanvas),
}

/// One headline block on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    /// Uppercased display text.
    pub text: String,

    /// CSS `text-align` value.
    pub text_align: &'static str,

    /// Entry-animation delay in milliseconds.
    pub delay_ms: u32,
}

/// Decorative accent bar under the headline blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccentBar {
    /// Bar color, taken from the palette accent.
    pub color: String,

    /// Left-aligned for the bottom-heavy layout, centered otherwise.
    pub centered: bool,

    /// Entry-animation delay in milliseconds.
    pub delay_ms: u32,
}

/// Fully resolved poster canvas, every style derived from the palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosterCanvas {
    /// Background image URL, generated or fallback.
    pub background_url: String,

    /// Gradient overlay start (palette primary).
    pub gradient_from: String,

    /// Gradient overlay end (palette secondary).
    pub gradient_to: String,

    /// Colored drop shadow around the canvas (primary at ~40% alpha).
    pub canvas_shadow: String,

    /// Headline color (palette text).
    pub text_color: String,

    /// Soft shadow behind the headline (secondary at ~50% alpha).
    pub text_shadow: String,

    /// CSS class carrying the typography style.
    pub font_class: &'static str,

    /// The layout variant this canvas was built from.
    pub layout: PosterLayout,

    /// CSS `justify-content` for the vertical text placement.
    pub justify_content: &'static str,

    /// CSS `text-align` default for the canvas.
    pub text_align: &'static str,

    /// CSS `padding` shorthand, heavier on the emphasized edge.
    pub padding: &'static str,

    /// One block for most layouts, two for `split`.
    pub headlines: Vec<Headline>,

    /// Decorative accent bar.
    pub accent: AccentBar,
}

/// Build the scene for the current state.
pub fn render(
    text: &str,
    config: Option<&PosterConfig>,
    background_image_url: Option<&str>,
    is_loading: bool,
) -> PosterScene {
    match (config, is_loading) {
        (None, false) => PosterScene::Empty {
            message: EMPTY_STATE_MESSAGE.to_string(),
        },
        (None, true) => PosterScene::Skeleton {
            message: SKELETON_MESSAGE.to_string(),
        },
        (Some(config), _) => PosterScene::Canvas(build_canvas(text, config, background_image_url)),
    }
}

/// Divide the text at the midpoint word boundary: first `ceil(n/2)`
/// space-separated words, then the remainder. Joining the halves with a
/// single space reconstructs the original text.
pub fn split_headline(text: &str) -> (String, String) {
    let words: Vec<&str> = text.split(' ').collect();
    let mid = words.len().div_ceil(2);
    (words[..mid].join(" "), words[mid..].join(" "))
}

fn build_canvas(
    text: &str,
    config: &PosterConfig,
    background_image_url: Option<&str>,
) -> PosterCanvas {
    let palette = &config.color_palette;

    let (justify_content, text_align, padding) = match config.layout {
        PosterLayout::Centered => ("center", "center", "3rem"),
        PosterLayout::BottomHeavy => ("flex-end", "left", "3rem 3rem 6rem"),
        PosterLayout::TopHeavy => ("flex-start", "center", "6rem 3rem 3rem"),
        PosterLayout::Split => ("space-between", "left", "3rem"),
    };

    let headlines = match config.layout {
        PosterLayout::Split => {
            let (first, second) = split_headline(text);
            vec![
                Headline {
                    text: first.to_uppercase(),
                    text_align: "left",
                    delay_ms: 200,
                },
                Headline {
                    text: second.to_uppercase(),
                    text_align: "right",
                    delay_ms: 500,
                },
            ]
        }
        _ => vec![Headline {
            text: text.to_uppercase(),
            text_align,
            delay_ms: 300,
        }],
    };

    PosterCanvas {
        background_url: background_image_url
            .unwrap_or(FALLBACK_BACKGROUND_URL)
            .to_string(),
        gradient_from: palette.primary.clone(),
        gradient_to: palette.secondary.clone(),
        canvas_shadow: format!("{}66", palette.primary),
        text_color: palette.text.clone(),
        text_shadow: format!("{}80", palette.secondary),
        font_class: config.font_style.css_class(),
        layout: config.layout,
        justify_content,
        text_align,
        padding,
        headlines,
        accent: AccentBar {
            color: palette.accent.clone(),
            centered: config.layout != PosterLayout::BottomHeavy,
            delay_ms: 800,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::{ColorPalette, PosterFont};

    fn jazz_config() -> PosterConfig {
        PosterConfig {
            image_prompt: "smoky blue stage lights, no text".to_string(),
            color_palette: ColorPalette {
                primary: "#1a1a2e".to_string(),
                secondary: "#16213e".to_string(),
                accent: "#e94560".to_string(),
                text: "#f5f5f5".to_string(),
            },
            font_style: PosterFont::Display,
            layout: PosterLayout::Centered,
            mood_description: "Cool and intimate".to_string(),
        }
    }

    #[test]
    fn no_config_and_idle_renders_the_empty_state() {
        let scene = render("Jazz Night", None, None, false);
        assert_eq!(
            scene,
            PosterScene::Empty {
                message: EMPTY_STATE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn loading_without_config_renders_the_skeleton() {
        let scene = render("Jazz Night", None, None, true);
        assert_eq!(
            scene,
            PosterScene::Skeleton {
                message: SKELETON_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn jazz_night_renders_a_centered_styled_headline() {
        let config = jazz_config();
        let scene = render(
            "Jazz Night",
            Some(&config),
            Some("data:image/png;base64,AAAA"),
            false,
        );

        let PosterScene::Canvas(canvas) = scene else {
            panic!("expected a canvas scene");
        };
        assert_eq!(canvas.background_url, "data:image/png;base64,AAAA");
        assert_eq!(canvas.headlines.len(), 1);
        assert_eq!(canvas.headlines[0].text, "JAZZ NIGHT");
        assert_eq!(canvas.headlines[0].text_align, "center");
        assert_eq!(canvas.text_color, "#f5f5f5");
        assert_eq!(canvas.gradient_from, "#1a1a2e");
        assert_eq!(canvas.gradient_to, "#16213e");
        assert_eq!(canvas.canvas_shadow, "#1a1a2e66");
        assert_eq!(canvas.text_shadow, "#16213e80");
        assert_eq!(canvas.font_class, "font-display");
        assert_eq!(canvas.accent.color, "#e94560");
        assert!(canvas.accent.centered);
    }

    #[test]
    fn missing_image_falls_back_to_the_placeholder() {
        let config = jazz_config();
        let scene = render("Jazz Night", Some(&config), None, true);
        let PosterScene::Canvas(canvas) = scene else {
            panic!("expected a canvas scene");
        };
        assert_eq!(canvas.background_url, FALLBACK_BACKGROUND_URL);
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = jazz_config();
        let first = render("Jazz Night", Some(&config), None, false);
        let second = render("Jazz Night", Some(&config), None, false);
        assert_eq!(first, second);

        // Inputs are untouched.
        assert_eq!(config, jazz_config());
    }

    #[test]
    fn split_layout_produces_two_staggered_blocks() {
        let mut config = jazz_config();
        config.layout = PosterLayout::Split;

        let scene = render("Summer Sale This Weekend", Some(&config), None, false);
        let PosterScene::Canvas(canvas) = scene else {
            panic!("expected a canvas scene");
        };
        assert_eq!(canvas.headlines.len(), 2);
        assert_eq!(canvas.headlines[0].text, "SUMMER SALE");
        assert_eq!(canvas.headlines[0].text_align, "left");
        assert_eq!(canvas.headlines[0].delay_ms, 200);
        assert_eq!(canvas.headlines[1].text, "THIS WEEKEND");
        assert_eq!(canvas.headlines[1].text_align, "right");
        assert_eq!(canvas.headlines[1].delay_ms, 500);
        assert_eq!(canvas.justify_content, "space-between");
    }

    #[test]
    fn bottom_heavy_layout_left_aligns_the_accent_bar() {
        let mut config = jazz_config();
        config.layout = PosterLayout::BottomHeavy;

        let scene = render("Jazz Night", Some(&config), None, false);
        let PosterScene::Canvas(canvas) = scene else {
            panic!("expected a canvas scene");
        };
        assert!(!canvas.accent.centered);
        assert_eq!(canvas.justify_content, "flex-end");
        assert_eq!(canvas.padding, "3rem 3rem 6rem");
    }

    #[test]
    fn split_headline_takes_the_word_ceiling_first() {
        for (text, first, second) in [
            ("Jazz Night", "Jazz", "Night"),
            ("Save the Planet", "Save the", "Planet"),
            ("One", "One", ""),
            ("a b c d e", "a b c", "d e"),
        ] {
            let (one, two) = split_headline(text);
            assert_eq!(one, first);
            assert_eq!(two, second);
        }
    }

    #[test]
    fn split_headline_reconstructs_the_original_text() {
        for text in ["Jazz Night", "Save the Planet", "a  b c", "spaced  out   words x"] {
            let (first, second) = split_headline(text);
            let rebuilt = if second.is_empty() && !text.contains(' ') {
                first.clone()
            } else {
                format!("{} {}", first, second)
            };
            assert_eq!(rebuilt, text);
        }
    }
}
