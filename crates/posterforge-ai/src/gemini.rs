//! Google Gemini provider implementation.
//!
//! Covers both halves of the pipeline: the structured-output analysis
//! call and the image-synthesis call whose reply carries inline binary
//! data.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use posterforge_core::{PosterConfig, PosterError, PosterProvider, ProviderConfig, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed quality/style modifiers appended to every image prompt.
const IMAGE_PROMPT_SUFFIX: &str =
    ", high quality, 4k, digital art, wallpaper style, no text, masterpiece";

/// Google Gemini provider for poster analysis and background generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: ProviderConfig,
}

// Request structures
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
    role: String,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

// Response structures
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let timeout = config.timeout_seconds.unwrap_or(60);
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()
            .map_err(|e| PosterError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// Reads `GEMINI_API_KEY` or `GOOGLE_API_KEY`, plus the optional
    /// model overrides understood by [`ProviderConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }

    // Google API auth is a query param, not a header like OpenAI.
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url(),
            model,
            self.config.api_key
        )
    }

    fn analysis_prompt(text: &str) -> String {
        format!(
            "Analyze the following text to design a visual poster: \"{text}\".\n\
             Determine the mood, a highly descriptive prompt for a background image \
             (abstract, textural, or scenic, but NO TEXT in the image), a color palette, \
             a font style, and a layout composition."
        )
    }

    /// Structured-output schema constraining the analysis reply to the
    /// `PosterConfig` shape, enum vocabularies included.
    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "imagePrompt": {
                    "type": "STRING",
                    "description": "A detailed prompt for an image generation model to create a background. Specify style (e.g., minimalist, grunge, oil painting, neon 3D). Explicitly state 'no text' in the prompt."
                },
                "moodDescription": {
                    "type": "STRING",
                    "description": "A short description of the mood (e.g., 'Energetic and bold' or 'Calm and serene')."
                },
                "colorPalette": {
                    "type": "OBJECT",
                    "properties": {
                        "primary": { "type": "STRING", "description": "Hex code for dominant color" },
                        "secondary": { "type": "STRING", "description": "Hex code for secondary color" },
                        "accent": { "type": "STRING", "description": "Hex code for accent color" },
                        "text": { "type": "STRING", "description": "Hex code for text color, ensuring high contrast with primary/secondary" }
                    },
                    "required": ["primary", "secondary", "accent", "text"]
                },
                "fontStyle": {
                    "type": "STRING",
                    "enum": ["font-modern", "font-display", "font-serif", "font-handwritten", "font-classic"],
                    "description": "The most appropriate typography style."
                },
                "layout": {
                    "type": "STRING",
                    "enum": ["centered", "bottom-heavy", "top-heavy", "split"],
                    "description": "The best text layout composition."
                }
            },
            "required": ["imagePrompt", "colorPalette", "fontStyle", "layout", "moodDescription"]
        })
    }

    async fn post_generate(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let url = self.generate_url(model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| PosterError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PosterError::Provider(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PosterError::Provider(e.to_string()))
    }
}

#[async_trait]
impl PosterProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, text))]
    async fn analyze_text(&self, text: &str) -> Result<PosterConfig> {
        debug!("Requesting poster analysis from Gemini");

        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Self::analysis_prompt(text),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            }),
        };

        let response = self
            .post_generate(&self.config.analysis_model, &request)
            .await?;

        // The structured reply arrives as the first text part.
        let payload = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_ref())
            .and_then(|parts| parts.iter().find_map(|p| p.text.as_deref()))
            .filter(|t| !t.trim().is_empty())
            .ok_or(PosterError::AnalysisFailed)?;

        let config: PosterConfig = serde_json::from_str(payload).map_err(|e| {
            debug!("Analysis payload rejected: {e}");
            PosterError::AnalysisFailed
        })?;

        config.validate().map_err(|e| {
            debug!("Analysis palette rejected: {e}");
            PosterError::AnalysisFailed
        })?;

        Ok(config)
    }

    #[instrument(skip(self, prompt))]
    async fn generate_background(&self, prompt: &str) -> Result<String> {
        debug!("Requesting background image from Gemini");

        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: format!("{prompt}{IMAGE_PROMPT_SUFFIX}"),
                }],
            }],
            generation_config: None,
        };

        let response = self
            .post_generate(&self.config.image_model, &request)
            .await?;

        // Scan the first candidate's parts for inline image data.
        let parts = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_ref());

        if let Some(parts) = parts {
            for part in parts {
                let Some(inline) = &part.inline_data else {
                    continue;
                };
                if inline.data.is_empty() {
                    continue;
                }
                BASE64.decode(inline.data.as_bytes()).map_err(|e| {
                    PosterError::Provider(format!("Image payload is not valid base64: {e}"))
                })?;
                return Ok(format!(
                    "data:{};base64,{}",
                    inline.mime_type, inline.data
                ));
            }
        }

        Err(PosterError::NoImage)
    }

    async fn health_check(&self) -> Result<bool> {
        // Minimal check: fetch the analysis model's resource.
        let url = format!(
            "{}/models/{}?key={}",
            self.base_url(),
            self.config.analysis_model,
            self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PosterError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posterforge_core::{PosterFont, PosterLayout};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(ProviderConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    fn analysis_body() -> serde_json::Value {
        let config = json!({
            "imagePrompt": "smoky blue stage lights, no text",
            "moodDescription": "Cool and intimate",
            "colorPalette": {
                "primary": "#1a1a2e",
                "secondary": "#16213e",
                "accent": "#e94560",
                "text": "#f5f5f5"
            },
            "fontStyle": "font-display",
            "layout": "centered"
        });
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": config.to_string() }] }
            }]
        })
    }

    #[tokio::test]
    async fn analyze_text_parses_structured_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_string_contains("Jazz Night"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .mount(&server)
            .await;

        let config = client_for(&server).analyze_text("Jazz Night").await.unwrap();

        assert_eq!(config.image_prompt, "smoky blue stage lights, no text");
        assert_eq!(config.font_style, PosterFont::Display);
        assert_eq!(config.layout, PosterLayout::Centered);
        assert_eq!(config.color_palette.text, "#f5f5f5");
    }

    #[tokio::test]
    async fn analyze_text_fails_on_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze_text("Jazz Night").await.unwrap_err();
        assert!(matches!(err, PosterError::AnalysisFailed));
    }

    #[tokio::test]
    async fn analyze_text_rejects_out_of_vocabulary_enums() {
        let server = MockServer::start().await;
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": json!({
                    "imagePrompt": "p",
                    "moodDescription": "m",
                    "colorPalette": {
                        "primary": "#111111",
                        "secondary": "#222222",
                        "accent": "#333333",
                        "text": "#ffffff"
                    },
                    "fontStyle": "font-gothic",
                    "layout": "centered"
                }).to_string() }] }
            }]
        });
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze_text("Jazz Night").await.unwrap_err();
        assert!(matches!(err, PosterError::AnalysisFailed));
    }

    #[tokio::test]
    async fn generate_background_returns_a_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image:generateContent"))
            .and(body_string_contains("wallpaper style, no text, masterpiece"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ] }
                }]
            })))
            .mount(&server)
            .await;

        let url = client_for(&server)
            .generate_background("smoky blue stage lights")
            .await
            .unwrap();
        assert_eq!(url, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn generate_background_skips_empty_inline_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } }
                    ] }
                }]
            })))
            .mount(&server)
            .await;

        let url = client_for(&server)
            .generate_background("anything")
            .await
            .unwrap();
        assert_eq!(url, "data:image/jpeg;base64,AAAA");
    }

    #[tokio::test]
    async fn generate_background_rejects_non_base64_payloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "not base64!!!" } }
                    ] }
                }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_background("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, PosterError::Provider(_)));
        assert!(err.to_string().contains("base64"));
    }

    #[tokio::test]
    async fn generate_background_fails_without_an_inline_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "no image for you" }] }
                }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_background("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, PosterError::NoImage));
    }

    #[tokio::test]
    async fn http_errors_map_to_provider_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_string("key rejected"))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze_text("Jazz Night").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("403"), "unexpected error: {message}");
        assert!(message.contains("key rejected"));
    }
}
