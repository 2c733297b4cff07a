use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::models::{CaseCreated, PestleRequest, StandardCaseRequest, SwotRequest};
use crate::state::AppState;

/// Run the full three-step consulting case.
pub async fn start_case(
    State(state): State<AppState>,
    Json(req): Json<StandardCaseRequest>,
) -> Result<Json<CaseCreated>, ApiError> {
    if req.company_name.trim().is_empty() {
        return Err(ApiError::BadRequest("company_name must not be empty".into()));
    }
    if req.problem_statement.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "problem_statement must not be empty".into(),
        ));
    }

    let record = state
        .engine
        .run_standard(
            req.company_name.trim(),
            req.industry.trim(),
            req.problem_statement.trim(),
            req.provider.as_deref(),
        )
        .await?;
    Ok(Json(CaseCreated::from(&record)))
}

pub async fn analyze_swot(
    State(state): State<AppState>,
    Json(req): Json<SwotRequest>,
) -> Result<Json<CaseCreated>, ApiError> {
    if req.company_name.trim().is_empty() {
        return Err(ApiError::BadRequest("company_name must not be empty".into()));
    }
    let record = state
        .engine
        .run_swot(req.company_name.trim(), req.provider.as_deref())
        .await?;
    Ok(Json(CaseCreated::from(&record)))
}

pub async fn analyze_pestle(
    State(state): State<AppState>,
    Json(req): Json<PestleRequest>,
) -> Result<Json<CaseCreated>, ApiError> {
    if req.industry.trim().is_empty() {
        return Err(ApiError::BadRequest("industry must not be empty".into()));
    }
    let record = state
        .engine
        .run_pestle(req.industry.trim(), req.provider.as_deref())
        .await?;
    Ok(Json(CaseCreated::from(&record)))
}
