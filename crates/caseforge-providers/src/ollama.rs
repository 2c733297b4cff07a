//! Local-model backend — Ollama's `/api/generate` endpoint.
//!
//! No auth; a long default timeout since local inference can be slow.
//! A response without the completion field is an empty-string success, not
//! an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use caseforge_core::config::OllamaConfig;
use caseforge_core::types::GenerateOptions;

use crate::error::ProviderError;
use crate::registry::ProviderId;
use crate::traits::LlmBackend;

/// Default timeout for local inference.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub struct OllamaClient {
    client: reqwest::Client,
    host: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: ModelOptions,
}

#[derive(Serialize)]
struct ModelOptions {
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.host)
    }
}

#[async_trait::async_trait]
impl LlmBackend for OllamaClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        let id = self.id();
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: ModelOptions {
                temperature: options.temperature,
            },
        };

        debug!(provider = id.as_str(), model = %self.model, "Calling local model");

        let mut request = self.client.post(self.generate_url()).json(&body);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| {
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

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            error!(provider = id.as_str(), error = %e, "Failed to parse response");
            ProviderError::Shape {
                provider: id,
                detail: e.to_string(),
            }
        })?;

        // Missing/empty completion field is a success, just an empty one.
        Ok(parsed.response.unwrap_or_default().trim().to_string())
    }

    fn id(&self) -> ProviderId {
        ProviderId::Ollama
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
