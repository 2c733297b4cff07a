//! Typed provider failures.
//!
//! The legacy contract surfaces every failure as a plain string beginning
//! with `[ERROR]` in the same channel as success. The typed error keeps the
//! machine-readable fields (kind, status, detail); its `Display` impl renders
//! exactly the legacy sentinel, so `err.to_string()` is the compatibility
//! shim used by [`crate::router::LlmRouter::generate`].

use crate::registry::ProviderId;

/// A failed provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Required API key missing from configuration; detected before any
    /// network call.
    #[error("[ERROR] {} API key missing: set {}.", .provider.display_name(), .provider.env_key().unwrap_or("the API key"))]
    MissingApiKey { provider: ProviderId },

    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("[ERROR] {} call failed: {detail}", .provider.display_name())]
    Transport { provider: ProviderId, detail: String },

    /// Non-2xx HTTP status from the backend.
    #[error("[ERROR] {} HTTP {status}: {body}", .provider.display_name())]
    Http {
        provider: ProviderId,
        status: u16,
        body: String,
    },

    /// Response arrived but did not have the expected shape.
    #[error("[ERROR] {} call failed: {detail}", .provider.display_name())]
    Shape { provider: ProviderId, detail: String },
}

impl ProviderError {
    /// The provider that failed.
    pub fn provider(&self) -> ProviderId {
        match self {
            ProviderError::MissingApiKey { provider }
            | ProviderError::Transport { provider, .. }
            | ProviderError::Http { provider, .. }
            | ProviderError::Shape { provider, .. } => *provider,
        }
    }

    /// Render the legacy single-string sentinel.
    pub fn to_sentinel(&self) -> String {
        self.to_string()
    }

    pub(crate) fn transport(provider: ProviderId, e: reqwest::Error) -> Self {
        ProviderError::Transport {
            provider,
            detail: e.to_string(),
        }
    }
}

/// Marker every sentinel string starts with. Callers on the legacy channel
/// check this prefix to distinguish failure from success.
pub const ERROR_MARKER: &str = "[ERROR]";

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
