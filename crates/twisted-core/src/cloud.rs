//! Client for the hosted `generateContent` endpoint, and the trait seam the
//! orchestrator talks to.

use crate::error::{GenerativeError, Result};
use crate::settings::Settings;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prompt for the text-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub model: String,
    pub contents: String,
    pub system_instruction: String,
}

/// Prompt plus image configuration for the image-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: String,
    pub image_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResponse {
    pub text: Option<String>,
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse>;

    async fn generate_image(&self, request: &ImageRequest) -> Result<GenerateContentResponse>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'a str; 2],
    image_config: ImageConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig<'a> {
    aspect_ratio: &'a str,
    image_size: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
    /// Reasoning summaries are not part of the answer text
    #[serde(default)]
    pub thought: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated answer text of the first candidate, if there is any.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image payload of the first candidate.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .filter_map(|part| part.inline_data.as_ref())
            .find(|inline| !inline.data.is_empty())
    }
}

/// `generateContent` over HTTPS. The credential is resolved on each call.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    settings: Settings,
}

impl GeminiClient {
    pub fn new(settings: Settings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        let base = self.settings.api_base.trim().trim_end_matches('/');
        let trimmed = model.trim();
        if trimmed.starts_with("models/") {
            format!("{}/{}:generateContent", base, trimmed)
        } else {
            format!("{}/models/{}:generateContent", base, trimmed)
        }
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .settings
            .resolve_api_key()
            .ok_or(GenerativeError::MissingApiKey)?;
        let url = self.endpoint_for_model(model);
        debug!(%url, "dispatching generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerativeError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart {
                    text: &request.contents,
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![TextPart {
                    text: &request.system_instruction,
                }],
            }),
            generation_config: None,
        };
        let response = self.generate(&request.model, &body).await?;
        Ok(TextResponse {
            text: response.text(),
        })
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<GenerateContentResponse> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart {
                    text: &request.prompt,
                }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: ["TEXT", "IMAGE"],
                image_config: ImageConfig {
                    aspect_ratio: &request.aspect_ratio,
                    image_size: &request.image_size,
                },
            }),
        };
        self.generate(&request.model, &body).await
    }
}
