//! Shared types — typed replacements for the ad-hoc dict payloads the rest of
//! the system passes around.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─────────────────────────────────────────────
// Generation options
// ─────────────────────────────────────────────

/// Configuration passed to each LLM call.
///
/// Absent fields use defaults; callers only override what they care about.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Output-token cap (`maxOutputTokens` for Gemini, `max_tokens` for Groq).
    pub max_tokens: u32,
    /// Optional system-role preamble (Groq only; other backends ignore it).
    pub system: Option<String>,
    /// Per-call timeout override. `None` uses the backend's own timeout
    /// (120s local, 60s cloud).
    pub timeout: Option<Duration>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 1024,
            system: None,
            timeout: None,
        }
    }
}

impl GenerateOptions {
    /// Options used by the report pipeline: higher token cap, long timeout.
    pub fn for_report(temperature: f64, max_tokens: u32, timeout_secs: u64) -> Self {
        Self {
            temperature,
            max_tokens,
            system: None,
            timeout: Some(Duration::from_secs(timeout_secs)),
        }
    }
}

// ─────────────────────────────────────────────
// Analysis types
// ─────────────────────────────────────────────

/// The kind of report a case produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Standard,
    Swot,
    Pestle,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Standard => "standard",
            AnalysisType::Swot => "swot",
            AnalysisType::Pestle => "pestle",
        }
    }

    /// Parse a stored string back into a type. Unknown values map to
    /// `Standard` so old rows still render.
    pub fn parse(s: &str) -> Self {
        match s {
            "swot" => AnalysisType::Swot,
            "pestle" => AnalysisType::Pestle,
            _ => AnalysisType::Standard,
        }
    }
}

// ─────────────────────────────────────────────
// Case records
// ─────────────────────────────────────────────

/// A persisted analysis case — one row in the `cases` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub provider: String,
    pub title: String,
    pub analysis_type: AnalysisType,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub problem_statement: String,
    /// Unix seconds.
    pub created_at: i64,
    /// The extracted recommendation, serialized as JSON text.
    pub final_recommendation: String,
    /// Path of the rendered HTML report on disk.
    pub report_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = GenerateOptions::default();
        assert_eq!(opts.temperature, 0.3);
        assert_eq!(opts.max_tokens, 1024);
        assert!(opts.system.is_none());
        assert!(opts.timeout.is_none());
    }

    #[test]
    fn test_report_options() {
        let opts = GenerateOptions::for_report(0.4, 8192, 300);
        assert_eq!(opts.temperature, 0.4);
        assert_eq!(opts.max_tokens, 8192);
        assert_eq!(opts.timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_analysis_type_round_trip() {
        for t in [AnalysisType::Standard, AnalysisType::Swot, AnalysisType::Pestle] {
            assert_eq!(AnalysisType::parse(t.as_str()), t);
        }
    }

    #[test]
    fn test_analysis_type_unknown_maps_to_standard() {
        assert_eq!(AnalysisType::parse("porter-five"), AnalysisType::Standard);
    }

    #[test]
    fn test_analysis_type_serde_lowercase() {
        let json = serde_json::to_string(&AnalysisType::Swot).unwrap();
        assert_eq!(json, "\"swot\"");
    }
}
