//! API request and response DTOs.

use serde::{Deserialize, Serialize};

use caseforge_core::types::{AnalysisType, CaseRecord};

/// `POST /start_case` payload.
#[derive(Clone, Debug, Deserialize)]
pub struct StandardCaseRequest {
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    pub problem_statement: String,
    /// Provider id override; falls back to the configured default.
    #[serde(default)]
    pub provider: Option<String>,
}

/// `POST /analyze/swot` payload.
#[derive(Clone, Debug, Deserialize)]
pub struct SwotRequest {
    pub company_name: String,
    #[serde(default)]
    pub provider: Option<String>,
}

/// `POST /analyze/pestle` payload.
#[derive(Clone, Debug, Deserialize)]
pub struct PestleRequest {
    pub industry: String,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Returned by every case-producing endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct CaseCreated {
    pub case_id: String,
    pub title: String,
    pub analysis_type: AnalysisType,
    pub provider: String,
    pub report_url: String,
}

impl From<&CaseRecord> for CaseCreated {
    fn from(record: &CaseRecord) -> Self {
        Self {
            case_id: record.case_id.clone(),
            title: record.title.clone(),
            analysis_type: record.analysis_type,
            provider: record.provider.clone(),
            report_url: format!("/reports/{}", record.case_id),
        }
    }
}
