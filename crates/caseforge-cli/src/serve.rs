//! Serve command — runs the HTTP API and report pipeline.
//!
//! Startup sequence:
//! 1. Load config
//! 2. Open the case store (SQLite) and resolve the reports directory
//! 3. Build the provider router + case engine
//! 4. Serve the axum router, shutting down on Ctrl+C

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use caseforge_core::config::load_config;
use caseforge_core::utils::{get_data_path, get_reports_path};
use caseforge_providers::LlmRouter;
use caseforge_server::{create_router, AppState, CaseEngine, CaseStore};

use crate::helpers;

/// Run the server until interrupted.
pub async fn run() -> Result<()> {
    helpers::print_banner();

    // 1. Load config
    let config = Arc::new(load_config(None));

    // 2. Storage locations
    let db_path = if config.storage.db_path.is_empty() {
        get_data_path().join("consulting.db")
    } else {
        helpers::expand_tilde(&config.storage.db_path)
    };
    let reports_dir = if config.storage.reports_dir.is_empty() {
        get_reports_path()
    } else {
        helpers::expand_tilde(&config.storage.reports_dir)
    };
    std::fs::create_dir_all(&reports_dir)
        .with_context(|| format!("failed to create reports dir: {}", reports_dir.display()))?;

    let store = CaseStore::open(&db_path)
        .with_context(|| format!("failed to open case store: {}", db_path.display()))?;

    // 3. Router + engine
    let router = Arc::new(LlmRouter::new(&config));
    let engine = Arc::new(CaseEngine::new(
        router,
        Arc::new(Mutex::new(store)),
        reports_dir.clone(),
        config.generation.clone(),
    ));

    let state = AppState::new(config.clone(), engine);
    let app = create_router(state);

    // 4. Serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!("  Listening on {}", addr.bold());
    println!("  Default provider: {}", config.providers.default.bold());
    println!("  Reports: {}", reports_dir.display());
    println!();
    info!(addr = %addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    println!();
    println!("{}", "Shutting down. Goodbye!".dimmed());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
