//! LLM provider layer for Caseforge.
//!
//! Uniformly abstracts over three heterogeneous text-generation backends —
//! a local Ollama server, Google's generateContent API, and Groq's
//! OpenAI-compatible chat API — each with its own auth, request/response
//! shape, and failure modes.
//!
//! # Architecture
//!
//! - [`registry::ProviderId`] — closed identifier enum + fallback parsing
//! - [`traits::LlmBackend`] — trait every backend client implements
//! - [`ollama`], [`gemini`], [`groq`] — one HTTP client per backend
//! - [`router::LlmRouter`] — dispatch; typed results via `complete`, the
//!   legacy `[ERROR] …` string channel via `generate`
//! - [`error::ProviderError`] — typed failure whose `Display` is the sentinel

pub mod error;
pub mod gemini;
pub mod groq;
pub mod ollama;
pub mod registry;
pub mod router;
pub mod traits;

pub use error::ProviderError;
pub use registry::ProviderId;
pub use router::LlmRouter;
pub use traits::LlmBackend;
