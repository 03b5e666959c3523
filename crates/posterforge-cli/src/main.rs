use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{info, warn};
use posterforge_ai::GeminiClient;
use posterforge_core::{
    render, GenerationStep, PosterEngine, PosterState, PosterView, ProviderConfig, StateObserver,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Input cap matching the original composer field.
const MAX_INPUT_CHARS: usize = 100;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a poster preview from short text
    Generate {
        /// What the poster should say (keep it punchy, max 100 characters)
        text: String,

        /// Output HTML file path (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analysis model override
        #[arg(long)]
        model: Option<String>,

        /// Image model override
        #[arg(long)]
        image_model: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Explain how to save a generated poster
    Save,
}

/// Mirrors the original UI's progress strip in the log.
struct LogObserver;

impl StateObserver for LogObserver {
    fn on_transition(&self, state: &PosterState) {
        match state.step {
            GenerationStep::Analyzing => info!("Analyzing Text"),
            GenerationStep::GeneratingImage => info!("Creating Art"),
            GenerationStep::Complete => info!("Poster complete"),
            GenerationStep::Idle => {
                if let Some(message) = &state.error {
                    warn!("Generation failed: {message}");
                }
            }
        }
    }
}

fn check_input(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Enter some text for the poster.");
    }
    if text.chars().count() > MAX_INPUT_CHARS {
        bail!("Poster text is limited to {MAX_INPUT_CHARS} characters.");
    }
    Ok(())
}

/// Design-analysis summary lines plus the failure message, if any.
///
/// The analysis is reported whenever a brief exists, so a cycle that
/// fetched a brief and then lost the image stage still shows it.
fn outcome_report(state: &PosterState) -> (Vec<String>, Option<String>) {
    let mut analysis = Vec::new();
    if let Some(config) = &state.config {
        let palette = &config.color_palette;
        analysis.push(format!("Mood: {}", config.mood_description));
        analysis.push(format!("Font: {} typography", config.font_style.label()));
        analysis.push(format!(
            "Palette: {} {} {} {}",
            palette.primary, palette.secondary, palette.accent, palette.text
        ));
    }
    (analysis, state.error.clone())
}

async fn generate(
    text: String,
    output: Option<PathBuf>,
    model: Option<String>,
    image_model: Option<String>,
    timeout: Option<u64>,
) -> Result<()> {
    check_input(&text)?;

    let mut config = ProviderConfig::from_env().context("Missing provider credentials")?;
    if let Some(model) = model {
        config = config.with_analysis_model(model);
    }
    if let Some(model) = image_model {
        config = config.with_image_model(model);
    }
    if let Some(seconds) = timeout {
        config = config.with_timeout(seconds);
    }

    let provider = GeminiClient::new(config)?;
    let engine = PosterEngine::new(provider).with_observer(Arc::new(LogObserver));

    let state = engine.generate(&text).await;

    let (analysis, failure) = outcome_report(&state);
    for line in &analysis {
        info!("{line}");
    }
    if let Some(message) = failure {
        bail!("{message}");
    }

    let scene = render(
        &text,
        state.config.as_ref(),
        state.background_image_url.as_deref(),
        state.is_loading,
    );
    let html = PosterView::new()?.render_html(&scene)?;

    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Preview written to {}", path.display());
        }
        None => println!("{html}"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            text,
            output,
            model,
            image_model,
            timeout,
        } => generate(text, output, model, image_model, timeout).await,
        Commands::Save => {
            // No export pipeline; point at the preview instead.
            println!(
                "To save your poster, right-click the preview image or use your \
                 device's screenshot tool for the highest quality."
            );
            Ok(())
        }
    }
}
