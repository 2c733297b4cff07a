use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::AppState;

/// Serve the rendered HTML report for a case.
pub async fn get_report(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state
        .engine
        .store()
        .get(&case_id)?
        .ok_or_else(|| ApiError::NotFound(case_id.clone()))?;

    let html = std::fs::read_to_string(&record.report_path)?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}
