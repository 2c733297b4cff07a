//! Cloud backend — Groq's OpenAI-compatible `/chat/completions` endpoint.
//!
//! Bearer auth. The prompt goes out as a single user-role message, optionally
//! preceded by a caller-supplied system preamble.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use caseforge_core::config::GroqConfig;
use caseforge_core::types::GenerateOptions;

use crate::error::ProviderError;
use crate::registry::ProviderId;
use crate::traits::LlmBackend;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    pub fn new(config: &GroqConfig) -> Self {
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

    fn completions_url(&self) -> String {
        format!("{}/openai/v1/chat/completions", self.api_base)
    }
}

#[async_trait::async_trait]
impl LlmBackend for GroqClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        let id = self.id();

        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey { provider: id });
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(ref system) = options.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!(provider = id.as_str(), model = %self.model, "Calling Groq");

        let mut request = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
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

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(provider = id.as_str(), error = %e, "Failed to parse response");
            ProviderError::Shape {
                provider: id,
                detail: e.to_string(),
            }
        })?;

        let first = parsed.choices.into_iter().next().ok_or_else(|| {
            ProviderError::Shape {
                provider: id,
                detail: "response contained no choices".to_string(),
            }
        })?;

        Ok(first.message.content.unwrap_or_default().trim().to_string())
    }

    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str, api_key: &str) -> GroqClient {
        GroqClient::new(&GroqConfig {
            api_key: api_key.to_string(),
            model: "llama3-70b-8192".to_string(),
            api_base: uri.to_string(),
        })
    }

    #[test]
    fn test_completions_url() {
        let client = client_for("https://api.groq.com/", "k");
        assert_eq!(
            client.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("Authorization", "Bearer gsk-test-123"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3-70b-8192",
                "messages": [{ "role": "user", "content": "hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-test",
                "choices": [{
                    "message": { "role": "assistant", "content": "  Hi there.  " },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), "gsk-test-123");
        let text = client
            .generate("hello", &GenerateOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "Hi there.");
    }

    #[tokio::test]
    async fn test_system_preamble_sent_first() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    { "role": "system", "content": "You are a consultant." },
                    { "role": "user", "content": "analyze" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "ok" } }]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), "gsk-test");
        let opts = GenerateOptions {
            system: Some("You are a consultant.".to_string()),
            ..Default::default()
        };
        // Body matcher failing would yield a 404 → error
        let text = client.generate("analyze", &opts).await.unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), "");
        let err = client
            .generate("hi", &GenerateOptions::default())
            .await
            .unwrap_err();

        let sentinel = err.to_sentinel();
        assert!(sentinel.starts_with("[ERROR]"));
        assert!(sentinel.contains("Groq"));
        assert!(sentinel.contains("GROQ_API_KEY"));
    }

    #[tokio::test]
    async fn test_rate_limit_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "message": "Rate limit exceeded", "type": "rate_limit_error" }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), "gsk-test");
        let err = client
            .generate("hi", &GenerateOptions::default())
            .await
            .unwrap_err();

        let sentinel = err.to_sentinel();
        assert!(sentinel.starts_with("[ERROR] Groq HTTP 429"));
        assert!(sentinel.contains("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_shape_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), "gsk-test");
        let err = client
            .generate("hi", &GenerateOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_sentinel().contains("no choices"));
    }

    #[tokio::test]
    async fn test_null_content_is_empty_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": null } }]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), "gsk-test");
        let text = client
            .generate("hi", &GenerateOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_network_error() {
        let client = client_for("http://127.0.0.1:1", "gsk-test");
        let err = client
            .generate("hi", &GenerateOptions::default())
            .await
            .unwrap_err();

        let sentinel = err.to_sentinel();
        assert!(sentinel.starts_with("[ERROR]"));
        assert!(sentinel.contains("Groq"));
    }
}
