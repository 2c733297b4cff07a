//! Caseforge HTTP service.
//!
//! - [`db`] — SQLite case store
//! - [`prompts`] — prompt builders for each analysis type
//! - [`pipeline`] — chained LLM calls → extraction → HTML render → persistence
//! - [`report`] — HTML report renderer
//! - [`routes`] / [`handlers`] — axum API surface

pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod routes;
pub mod state;

pub use db::CaseStore;
pub use pipeline::CaseEngine;
pub use routes::create_router;
pub use state::AppState;
