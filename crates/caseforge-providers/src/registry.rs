//! Provider identifiers and matching logic.
//!
//! The enumeration is closed: {ollama, gemini, groq}. Parsing is
//! case-insensitive and whitespace-trimmed. Unrecognized values route to the
//! configured default rather than failing — callers send free-form provider
//! strings and the contract is that dispatch always succeeds. The fallback is
//! logged so typos are observable.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A text-generation backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Local model server (long timeout, no auth).
    Ollama,
    /// Google generateContent API (query-string key auth).
    Gemini,
    /// Groq OpenAI-compatible chat API (bearer auth).
    Groq,
}

impl ProviderId {
    /// Every known provider, in display order.
    pub const ALL: [ProviderId; 3] = [ProviderId::Ollama, ProviderId::Gemini, ProviderId::Groq];

    /// Internal name, also the config key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "ollama",
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
        }
    }

    /// Human-readable name for logs and error sentinels.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "Ollama",
            ProviderId::Gemini => "Gemini",
            ProviderId::Groq => "Groq",
        }
    }

    /// Environment variable holding the API key, where one is required.
    pub fn env_key(&self) -> Option<&'static str> {
        match self {
            ProviderId::Ollama => None,
            ProviderId::Gemini => Some("GEMINI_API_KEY"),
            ProviderId::Groq => Some("GROQ_API_KEY"),
        }
    }

    /// Strict parse: trims and lower-cases, `None` for anything else.
    pub fn parse(s: &str) -> Option<ProviderId> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Some(ProviderId::Ollama),
            "gemini" => Some(ProviderId::Gemini),
            "groq" => Some(ProviderId::Groq),
            _ => None,
        }
    }

    /// Resolve a free-form (possibly absent) provider string.
    ///
    /// Unrecognized or absent values fall back to `default`, with a warning
    /// for non-empty unrecognized input. If the configured default is itself
    /// unrecognized, Ollama (the local backend) wins.
    pub fn resolve(requested: Option<&str>, default: &str) -> ProviderId {
        if let Some(raw) = requested {
            if let Some(id) = ProviderId::parse(raw) {
                return id;
            }
            if !raw.trim().is_empty() {
                warn!(provider = raw, "unknown provider requested, using default");
            }
        }
        ProviderId::parse(default).unwrap_or(ProviderId::Ollama)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        assert_eq!(ProviderId::parse("ollama"), Some(ProviderId::Ollama));
        assert_eq!(ProviderId::parse("gemini"), Some(ProviderId::Gemini));
        assert_eq!(ProviderId::parse("groq"), Some(ProviderId::Groq));
    }

    #[test]
    fn test_parse_case_insensitive_and_trimmed() {
        assert_eq!(ProviderId::parse("  GROQ "), Some(ProviderId::Groq));
        assert_eq!(ProviderId::parse("Gemini\n"), Some(ProviderId::Gemini));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(ProviderId::parse("openai"), None);
        assert_eq!(ProviderId::parse(""), None);
    }

    #[test]
    fn test_resolve_explicit() {
        assert_eq!(
            ProviderId::resolve(Some("groq"), "ollama"),
            ProviderId::Groq
        );
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_default() {
        assert_eq!(
            ProviderId::resolve(Some("chatgpt"), "gemini"),
            ProviderId::Gemini
        );
    }

    #[test]
    fn test_resolve_absent_uses_default() {
        assert_eq!(ProviderId::resolve(None, "groq"), ProviderId::Groq);
    }

    #[test]
    fn test_resolve_bad_default_uses_ollama() {
        assert_eq!(
            ProviderId::resolve(Some("nope"), "also-nope"),
            ProviderId::Ollama
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ProviderId::Gemini).unwrap();
        assert_eq!(json, "\"gemini\"");
        let back: ProviderId = serde_json::from_str("\"groq\"").unwrap();
        assert_eq!(back, ProviderId::Groq);
    }

    #[test]
    fn test_env_keys() {
        assert_eq!(ProviderId::Ollama.env_key(), None);
        assert_eq!(ProviderId::Gemini.env_key(), Some("GEMINI_API_KEY"));
        assert_eq!(ProviderId::Groq.env_key(), Some("GROQ_API_KEY"));
    }
}
