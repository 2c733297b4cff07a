use axum::extract::State;
use axum::Json;

use crate::db::CaseSummary;
use crate::error::ApiError;
use crate::state::AppState;

/// List all persisted cases, newest first.
pub async fn list_cases(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseSummary>>, ApiError> {
    let cases = state.engine.store().list()?;
    Ok(Json(cases))
}
