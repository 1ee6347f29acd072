//! Google Gemini transport.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::types::{ConversationTurn, Role};

use super::http::{build_client, status_to_error};
use super::ChatTransport;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const SMOKE_TEST_PROMPT: &str = "Say 'Hello from FitPro' in one sentence.";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Set up a client from configuration.
    ///
    /// Fails with a configuration error when no usable key is present or
    /// the HTTP client cannot be built.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AssistantError::Configuration("no Gemini API key configured".into()))?;

        if config.model.trim().is_empty() {
            return Err(AssistantError::Configuration("Gemini model name is empty".into()));
        }

        Ok(Self {
            http: build_client(config.request_timeout)?,
            api_key: api_key.to_string(),
            model: config.model.trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a one-line prompt to check the key and endpoint work.
    pub async fn smoke_test(&self) -> Result<String> {
        self.complete(&[ConversationTurn::user(SMOKE_TEST_PROMPT)])
            .await
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

pub(crate) fn build_request_body(turns: &[ConversationTurn]) -> serde_json::Value {
    let mut system_instruction = None;
    let mut contents = Vec::new();

    for turn in turns {
        match turn.role {
            Role::SystemInstruction => {
                system_instruction = Some(serde_json::json!({
                    "parts": [{"text": turn.content}]
                }));
            }
            Role::User => contents.push(serde_json::json!({
                "role": "user",
                "parts": [{"text": turn.content}],
            })),
            Role::Assistant => contents.push(serde_json::json!({
                "role": "model",
                "parts": [{"text": turn.content}],
            })),
        }
    }

    let mut body = serde_json::Map::new();
    body.insert("contents".into(), serde_json::Value::Array(contents));
    if let Some(sys) = system_instruction {
        body.insert("systemInstruction".into(), sys);
    }
    serde_json::Value::Object(body)
}

fn extract_text(data: GeminiResponse) -> Result<String> {
    let candidate = data
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AssistantError::EmptyResponse("gemini: no candidates".into()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(AssistantError::EmptyResponse(format!(
            "gemini: no text (finish reason {reason})"
        )));
    }
    Ok(text)
}

#[async_trait]
impl ChatTransport for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, turns: &[ConversationTurn]) -> Result<String> {
        let body = build_request_body(turns);

        debug!(model = %self.model, turns = turns.len(), "Gemini generateContent");

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let bytes = resp.bytes().await?;
        let data: GeminiResponse = serde_json::from_slice(&bytes)?;
        extract_text(data)
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
