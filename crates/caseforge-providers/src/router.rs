//! Provider router — builds the three backend clients from config and
//! dispatches each call to exactly one of them.
//!
//! Two result channels:
//! - [`LlmRouter::complete`] — the typed contract, `Result<String, ProviderError>`
//! - [`LlmRouter::generate`] — the legacy contract: total, always a string,
//!   failures rendered as the `[ERROR] …` sentinel in the success channel

use tracing::{debug, warn};

use caseforge_core::config::Config;
use caseforge_core::types::GenerateOptions;

use crate::error::ProviderError;
use crate::gemini::GeminiClient;
use crate::groq::GroqClient;
use crate::ollama::OllamaClient;
use crate::registry::ProviderId;
use crate::traits::LlmBackend;

pub struct LlmRouter {
    ollama: OllamaClient,
    gemini: GeminiClient,
    groq: GroqClient,
    default_provider: String,
}

impl LlmRouter {
    /// Build a router from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        debug!(
            default = %config.providers.default,
            gemini_configured = config.providers.gemini.is_configured(),
            groq_configured = config.providers.groq.is_configured(),
            "Creating LLM router"
        );

        Self {
            ollama: OllamaClient::new(&config.providers.ollama),
            gemini: GeminiClient::new(&config.providers.gemini),
            groq: GroqClient::new(&config.providers.groq),
            default_provider: config.providers.default.clone(),
        }
    }

    /// Resolve a free-form provider string to a concrete backend.
    pub fn resolve(&self, requested: Option<&str>) -> ProviderId {
        ProviderId::resolve(requested, &self.default_provider)
    }

    fn backend(&self, id: ProviderId) -> &dyn LlmBackend {
        match id {
            ProviderId::Ollama => &self.ollama,
            ProviderId::Gemini => &self.gemini,
            ProviderId::Groq => &self.groq,
        }
    }

    /// One remote call, typed result.
    pub async fn complete(
        &self,
        id: ProviderId,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        self.backend(id).generate(prompt, options).await
    }

    /// Legacy single-string channel: resolves the provider (falling back to
    /// the default for unknown identifiers), performs one call, and renders
    /// any failure as the error sentinel.
    pub async fn generate(
        &self,
        provider: Option<&str>,
        prompt: &str,
        options: &GenerateOptions,
    ) -> String {
        let id = self.resolve(provider);
        match self.complete(id, prompt, options).await {
            Ok(text) => text,
            Err(e) => {
                warn!(provider = id.as_str(), error = %e, "provider call failed");
                e.to_sentinel()
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
