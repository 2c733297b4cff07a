//! Route table for the HTTP API.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/cases", get(handlers::cases::list_cases))
        .route("/start_case", post(handlers::analyze::start_case))
        .route("/analyze/swot", post(handlers::analyze::analyze_swot))
        .route("/analyze/pestle", post(handlers::analyze::analyze_pestle))
        .route("/reports/:case_id", get(handlers::reports::get_report))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
