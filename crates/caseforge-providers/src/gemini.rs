//! Cloud backend — Google's `generateContent` API.
//!
//! Auth is a query-string `key` parameter. The response nests the completion
//! under `candidates[0].content.parts[*].text`; parts are concatenated. An
//! empty concatenation degrades to a truncated dump of the raw body so the
//! caller still gets something displayable.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use caseforge_core::config::GeminiConfig;
use caseforge_core::types::GenerateOptions;
use caseforge_core::utils::truncate_chars;

use crate::error::ProviderError;
use crate::registry::ProviderId;
use crate::traits::LlmBackend;

/// Default timeout for cloud calls; route-level callers override per call.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Cap for the raw-body fallback when no text parts come back.
const RAW_BODY_CAP: usize = 2000;

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Pull every text fragment out of the first candidate's content parts.
    ///
    /// The shape is loose in practice: parts are usually `{"text": ...}`
    /// objects but bare strings have been observed, so both are accepted.
    fn collect_text(body: &Value) -> String {
        let parts = body
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array());

        let mut out = String::new();
        if let Some(parts) = parts {
            for part in parts {
                match part {
                    Value::Object(obj) => {
                        if let Some(Value::String(text)) = obj.get("text") {
                            out.push_str(text);
                        }
                    }
                    Value::String(text) => out.push_str(text),
                    _ => {}
                }
            }
        }
        out
    }
}

#[async_trait::async_trait]
impl LlmBackend for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        let id = self.id();

        // Short-circuit before any network traffic.
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey { provider: id });
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
            },
        };

        debug!(provider = id.as_str(), model = %self.model, "Calling Gemini");

        let mut request = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = id.as_str(), error = %e, "HTTP request failed");
            ProviderError::transport(id, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(provider = id.as_str(), status = %status, body = %body, "API error");
            return Err(ProviderError::Http {
                provider: id,
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await.map_err(|e| {
            error!(provider = id.as_str(), error = %e, "Failed to read response body");
            ProviderError::transport(id, e)
        })?;

        let parsed: Value = serde_json::from_str(&raw).map_err(|e| ProviderError::Shape {
            provider: id,
            detail: e.to_string(),
        })?;

        let text = Self::collect_text(&parsed).trim().to_string();
        if text.is_empty() {
            // Best-effort display of whatever came back.
            return Ok(truncate_chars(&raw, RAW_BODY_CAP));
        }
        Ok(text)
    }

    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
