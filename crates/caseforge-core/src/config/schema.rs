//! Configuration schema.
//!
//! Hierarchy: `Config` → `ServerConfig`, `StorageConfig`, `ProvidersConfig`,
//! `GenerationDefaults`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.caseforge/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub providers: ProvidersConfig,
    pub generation: GenerationDefaults,
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP server listen settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

// ─────────────────────────────────────────────
// Storage
// ─────────────────────────────────────────────

/// On-disk storage locations. Empty strings mean "use the data directory".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// SQLite database file. Default: `~/.caseforge/consulting.db`.
    #[serde(default)]
    pub db_path: String,
    /// Directory for rendered HTML reports. Default: `~/.caseforge/reports`.
    #[serde(default)]
    pub reports_dir: String,
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// All provider configurations plus the default selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    /// Provider used when a request names none, or names an unknown one.
    pub default: String,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub groq: GroqConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            default: "ollama".to_string(),
            ollama: OllamaConfig::default(),
            gemini: GeminiConfig::default(),
            groq: GroqConfig::default(),
        }
    }
}

/// Local model server (Ollama) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OllamaConfig {
    /// Base URL of the local endpoint.
    pub host: String,
    /// Model identifier sent in the request body.
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
        }
    }
}

/// Gemini (generateContent API) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeminiConfig {
    /// API key; empty means the provider is not configured.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier sent in the request path.
    pub model: String,
    /// API base URL (overridable for testing/proxies).
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// Groq (OpenAI-compatible chat API) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroqConfig {
    /// API key; empty means the provider is not configured.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier sent in the request body.
    pub model: String,
    /// API base URL (overridable for testing/proxies).
    pub api_base: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "llama3-70b-8192".to_string(),
            api_base: "https://api.groq.com".to_string(),
        }
    }
}

impl GeminiConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl GroqConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Generation defaults
// ─────────────────────────────────────────────

/// Defaults applied by the report pipeline to each LLM call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationDefaults {
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Output-token cap.
    pub max_tokens: u32,
    /// Route-level timeout in seconds for pipeline calls.
    pub timeout_secs: u64,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_tokens: 8192,
            timeout_secs: 300,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.providers.default, "ollama");
        assert_eq!(config.providers.ollama.host, "http://localhost:11434");
        assert_eq!(config.providers.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.providers.groq.model, "llama3-70b-8192");
        assert_eq!(config.generation.temperature, 0.4);
        assert_eq!(config.generation.max_tokens, 8192);
        assert_eq!(config.generation.timeout_secs, 300);
    }

    #[test]
    fn test_config_from_json_camel_case() {
        let json = serde_json::json!({
            "server": { "host": "127.0.0.1", "port": 9090 },
            "providers": {
                "default": "gemini",
                "gemini": { "apiKey": "g-123", "model": "gemini-1.5-pro" }
            },
            "generation": { "maxTokens": 4096 }
        });

        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.providers.default, "gemini");
        assert_eq!(config.providers.gemini.api_key, "g-123");
        assert_eq!(config.providers.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.generation.max_tokens, 4096);
        // Defaults preserved for missing fields
        assert_eq!(config.generation.temperature, 0.4);
        assert_eq!(config.providers.groq.api_base, "https://api.groq.com");
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["providers"]["gemini"].get("apiKey").is_some());
        assert!(json["generation"].get("maxTokens").is_some());
        assert!(json["generation"].get("max_tokens").is_none());
    }

    #[test]
    fn test_is_configured() {
        let mut gemini = GeminiConfig::default();
        assert!(!gemini.is_configured());
        gemini.api_key = "key".into();
        assert!(gemini.is_configured());

        let mut groq = GroqConfig::default();
        assert!(!groq.is_configured());
        groq.api_key = "key".into();
        assert!(groq.is_configured());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.providers.default, "ollama");
        assert_eq!(config.providers.ollama.model, "llama3");
    }
}
