//! Caseforge CLI — entry point.
//!
//! # Commands
//!
//! - `caseforge serve` — run the HTTP API + report pipeline
//! - `caseforge ask -m MESSAGE [-p PROVIDER]` — one-shot generation
//! - `caseforge init` — write the default config + data layout
//! - `caseforge status` — show configuration and provider status

mod ask;
mod helpers;
mod init;
mod serve;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Caseforge — AI business consulting report engine
#[derive(Parser)]
#[command(name = "caseforge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Send a single prompt to a provider and print the result
    Ask {
        /// The prompt to send
        #[arg(short, long)]
        message: String,

        /// Provider id (ollama, gemini, groq). Omit for the configured default.
        #[arg(short, long)]
        provider: Option<String>,

        /// Print the extracted JSON object instead of the raw text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration and data directories
    Init,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { logs } => {
            init_logging(logs);
            serve::run().await
        }
        Commands::Ask {
            message,
            provider,
            json,
            logs,
        } => {
            init_logging(logs);
            ask::run(&message, provider.as_deref(), json).await
        }
        Commands::Init => init::run(),
        Commands::Status => status::run(),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("caseforge=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
