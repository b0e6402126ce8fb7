//! Gemini client over the `generateContent` REST endpoint.
//!
//! The system prompt goes out as `systemInstruction` and the rendered
//! prompt as a single user text part. An attached image is sent alongside
//! it as inline base64 data.

use crate::agents::base::{ClientFactory, GenerationClient, GenerationError, GenerationRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPartOwned>,
}

#[derive(Deserialize)]
struct GeminiPartOwned {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

fn build_payload(request: &GenerationRequest) -> GeminiPayload<'_> {
    let mut parts = vec![GeminiPart::Text {
        text: &request.prompt,
    }];
    if let Some(image) = &request.image {
        parts.push(GeminiPart::Inline {
            inline_data: InlineData {
                mime_type: image.mime_type(),
                data: image.data(),
            },
        });
    }

    let system_instruction = (!request.system_prompt.trim().is_empty()).then(|| SystemInstruction {
        parts: vec![GeminiPart::Text {
            text: &request.system_prompt,
        }],
    });

    GeminiPayload {
        system_instruction,
        contents: vec![GeminiContent {
            role: "user",
            parts,
        }],
    }
}

/// Concatenated text of the first candidate, or `None` when it has none.
fn extract_text(response: GeminiResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// One Gemini client bound to an API key and model.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_http(Client::new(), DEFAULT_BASE_URL, api_key, model)
    }

    fn with_http(
        http: Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, GenerationError> {
        let payload = build_payload(request);
        tracing::debug!(model = %self.model, has_image = request.image.is_some(), "calling Gemini");

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let data: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(extract_text(data))
    }
}

/// Hands out the shared default client, or a dedicated one for an agent
/// that carries its own key.
pub struct GeminiClientFactory {
    http: Client,
    base_url: String,
    model: String,
    default_client: Option<Arc<dyn GenerationClient>>,
}

impl GeminiClientFactory {
    /// `default_key` backs every agent without its own credential.
    pub fn new(model: impl Into<String>, default_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, model, default_key)
    }

    pub fn with_base_url(
        base_url: &str,
        model: impl Into<String>,
        default_key: Option<String>,
    ) -> Self {
        let http = Client::new();
        let model = model.into();
        let default_client = default_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| {
                Arc::new(GeminiClient::with_http(http.clone(), base_url, key, model.clone()))
                    as Arc<dyn GenerationClient>
            });

        Self {
            http,
            base_url: base_url.to_string(),
            model,
            default_client,
        }
    }
}

impl ClientFactory for GeminiClientFactory {
    fn client_for(
        &self,
        credential: Option<&str>,
    ) -> Result<Arc<dyn GenerationClient>, GenerationError> {
        match credential.filter(|key| !key.trim().is_empty()) {
            Some(key) => Ok(Arc::new(GeminiClient::with_http(
                self.http.clone(),
                &self.base_url,
                key,
                self.model.clone(),
            ))),
            None => self
                .default_client
                .clone()
                .ok_or(GenerationError::MissingCredential),
        }
    }
}
