//! Client for the external image generation service.
//!
//! One logical operation: given a theme, make a single `generateContent`
//! request and hand back the first inline image as a self-contained data URI.
//! No retries, no client-side timeout; one attempt per user submission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::GEMINI_API_BASE;
use crate::prompt::StampPrompt;

/// Ways a generation attempt can fail. Users only ever see the fixed error
/// copy; the detail here is for logs.
#[derive(Debug)]
pub enum GenerationFailure {
    /// Transport error, non-2xx response, or an unparseable body.
    ServiceError(String),
    /// The service answered 2xx but no content part carried inline image data.
    NoImageInResponse,
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ServiceError(cause) => write!(f, "Image service error: {cause}"),
            Self::NoImageInResponse => write!(f, "Image part not found in response"),
        }
    }
}

impl std::error::Error for GenerationFailure {}

impl From<reqwest::Error> for GenerationFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::ServiceError(err.to_string())
    }
}

/// The capability of turning a theme into a displayable image reference.
/// Injected into the web state so tests can substitute a fake.
#[async_trait]
pub trait StampGenerator: Send + Sync {
    /// Generates one stamp image for the theme, returning a data URI.
    async fn generate(&self, theme: &str) -> Result<String, GenerationFailure>;
}

// Request body for POST /models/{model}:generateContent
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 1],
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    // The service has used both spellings over time.
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize, Debug)]
struct InlineData {
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

/// Generation client backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiGenerator {
    /// Builds a client for the given key and model against the public API base.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            api_base: GEMINI_API_BASE.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl StampGenerator for GeminiGenerator {
    async fn generate(&self, theme: &str) -> Result<String, GenerationFailure> {
        let prompt = StampPrompt::new(theme);
        let req_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: prompt.system_instruction,
                    },
                    Part {
                        text: &prompt.theme_instruction,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["IMAGE"],
            },
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&req_body)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(GenerationFailure::ServiceError(format!(
                "generateContent returned {status}: {}",
                String::from_utf8_lossy(&bytes)
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|err| {
            GenerationFailure::ServiceError(format!("unparseable generateContent body: {err}"))
        })?;

        first_inline_image(&parsed).ok_or(GenerationFailure::NoImageInResponse)
    }
}

/// Finds the first content part carrying inline image data and wraps it as a
/// data URI, defaulting the mime type to PNG when the service omits it.
fn first_inline_image(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
        .map(|inline| {
            format!(
                "data:{};base64,{}",
                inline.mime_type.as_deref().unwrap_or("image/png"),
                inline.data
            )
        })
}
