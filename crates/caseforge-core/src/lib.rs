//! Core building blocks for Caseforge.
//!
//! - [`config`] — typed configuration, loaded from JSON + env vars
//! - [`extract`] — best-effort JSON recovery from free-form LLM output
//! - [`types`] — generation options, analysis types, case records
//! - [`utils`] — paths, timestamps, string helpers

pub mod config;
pub mod extract;
pub mod types;
pub mod utils;

pub use config::{load_config, Config};
pub use extract::extract_json;
pub use types::{AnalysisType, CaseRecord, GenerateOptions};
