//! Shared application state handed to every handler.

use std::sync::Arc;

use caseforge_core::config::Config;

use crate::pipeline::CaseEngine;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<CaseEngine>,
}

impl AppState {
    pub fn new(config: Arc<Config>, engine: Arc<CaseEngine>) -> Self {
        Self { config, engine }
    }
}
