use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// Liveness probe; also reports which cloud providers carry credentials.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "default_provider": state.config.providers.default,
        "gemini_configured": state.config.providers.gemini.is_configured(),
        "groq_configured": state.config.providers.groq.is_configured(),
    }))
}
