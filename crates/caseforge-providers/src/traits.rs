//! The backend seam — one trait all provider clients implement.

use async_trait::async_trait;
use caseforge_core::types::GenerateOptions;

use crate::error::ProviderError;
use crate::registry::ProviderId;

/// A text-generation backend.
///
/// One outbound request per call; no retries, no caching, no shared mutable
/// state. Implementations convert every transport/protocol/shape failure into
/// a [`ProviderError`] rather than panicking.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Submit `prompt` and return the completion text.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError>;

    /// Which provider this client talks to.
    fn id(&self) -> ProviderId;
}
