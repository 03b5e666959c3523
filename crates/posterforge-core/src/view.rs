//! HTML preview rendering.
//!
//! Turns a [`PosterScene`](crate::render::PosterScene) into a standalone
//! HTML document via handlebars. One registered template per scene kind;
//! rendering a given scene twice yields byte-identical output.

use crate::render::PosterScene;
use crate::{PosterError, Result};
use handlebars::Handlebars;
use serde_json::json;

const EMPTY_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>PosterForge Preview</title></head>
<body>
<div class="poster-placeholder" style="display:flex;align-items:center;justify-content:center;aspect-ratio:3/4;max-width:600px;border:2px dashed #374151;border-radius:0.5rem;color:#9ca3af;font-family:sans-serif;">
  <p>{{message}}</p>
</div>
</body>
</html>
"#;

const SKELETON_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>PosterForge Preview</title></head>
<body>
<div class="poster-skeleton" style="display:flex;align-items:center;justify-content:center;aspect-ratio:3/4;max-width:600px;background:#1f2937;border-radius:0.5rem;color:#6b7280;font-family:monospace;">
  <span>{{message}}</span>
</div>
</body>
</html>
"#;

const CANVAS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>PosterForge Preview</title>
<style>
  .poster { position: relative; display: flex; flex-direction: column; aspect-ratio: 3/4; max-width: 600px; border-radius: 0.5rem; overflow: hidden; background-size: cover; background-position: center; }
  .poster .overlay { position: absolute; inset: 0; opacity: 0.4; mix-blend-mode: multiply; }
  .poster .content { position: relative; z-index: 10; width: 100%; line-height: 1.1; letter-spacing: -0.025em; }
  .poster h1 { font-size: 4rem; font-weight: 800; text-transform: uppercase; margin: 0 0 0.5rem; opacity: 0; animation: fade-in-up 0.7s ease forwards; }
  .poster .accent { width: 6rem; height: 0.5rem; border-radius: 9999px; margin-top: 1.5rem; opacity: 0; animation: width-grow 0.7s ease forwards; }
  .font-modern { font-family: "Helvetica Neue", Arial, sans-serif; }
  .font-display { font-family: Impact, "Arial Black", sans-serif; }
  .font-serif { font-family: "Times New Roman", serif; }
  .font-handwritten { font-family: "Comic Sans MS", cursive; }
  .font-classic { font-family: Georgia, "Book Antiqua", serif; }
  @keyframes fade-in-up { 0% { opacity: 0; transform: translateY(20px); } 100% { opacity: 1; transform: translateY(0); } }
  @keyframes width-grow { 0% { width: 0; opacity: 0; } 100% { width: 6rem; opacity: 1; } }
</style>
</head>
<body>
<div class="poster {{font_class}} layout-{{layout}}" style="background-image: url('{{{background_url}}}'); justify-content: {{justify_content}}; text-align: {{text_align}}; padding: {{padding}}; box-shadow: 0 20px 50px -12px {{canvas_shadow}};">
  <div class="overlay" style="background: linear-gradient(to bottom, {{gradient_from}}, {{gradient_to}});"></div>
  <div class="content">
{{#each headlines}}
    <h1 style="color: {{../text_color}}; text-shadow: 0 2px 10px {{../text_shadow}}; text-align: {{text_align}}; animation-delay: {{delay_ms}}ms;">{{text}}</h1>
{{/each}}
    <div class="accent" style="background-color: {{accent.color}}; animation-delay: {{accent.delay_ms}}ms; margin-left: {{#if accent.centered}}auto{{else}}0{{/if}}; margin-right: auto;"></div>
  </div>
</div>
</body>
</html>
"#;

/// Handlebars-backed renderer for poster scenes.
pub struct PosterView {
    registry: Handlebars<'static>,
}

impl PosterView {
    /// Create a view with the built-in templates registered.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        for (name, template) in [
            ("empty", EMPTY_TEMPLATE),
            ("skeleton", SKELETON_TEMPLATE),
            ("canvas", CANVAS_TEMPLATE),
        ] {
            registry
                .register_template_string(name, template)
                .map_err(|e| PosterError::Render(e.to_string()))?;
        }
        Ok(Self { registry })
    }

    /// Render a scene to a standalone HTML document.
    pub fn render_html(&self, scene: &PosterScene) -> Result<String> {
        let rendered = match scene {
            PosterScene::Empty { message } => {
                self.registry.render("empty", &json!({ "message": message }))
            }
            PosterScene::Skeleton { message } => {
                self.registry.render("skeleton", &json!({ "message": message }))
            }
            PosterScene::Canvas(canvas) => self.registry.render("canvas", canvas),
        };
        rendered.map_err(|e| PosterError::Render(e.to_string()))
    }
}
