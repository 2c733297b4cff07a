//! `caseforge status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use caseforge_core::config::{get_config_path, load_config};
use caseforge_core::utils::{get_data_path, get_reports_path};
use caseforge_providers::ProviderId;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "📊 Caseforge Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Data dir + reports
    println!("  {:<18} {}", "Data:".bold(), get_data_path().display());
    let reports_dir = if config.storage.reports_dir.is_empty() {
        get_reports_path()
    } else {
        crate::helpers::expand_tilde(&config.storage.reports_dir)
    };
    println!("  {:<18} {}", "Reports:".bold(), reports_dir.display());

    // Server
    println!(
        "  {:<18} {}:{}",
        "Listen:".bold(),
        config.server.host,
        config.server.port
    );

    // Generation defaults
    println!(
        "  {:<18} {} | max_tokens: {} | timeout: {}s",
        "Generation:".bold(),
        format!("temp: {}", config.generation.temperature).dimmed(),
        format!("{}", config.generation.max_tokens).dimmed(),
        format!("{}", config.generation.timeout_secs).dimmed(),
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    for id in ProviderId::ALL {
        let configured = match id {
            ProviderId::Ollama => true,
            ProviderId::Gemini => config.providers.gemini.is_configured(),
            ProviderId::Groq => config.providers.groq.is_configured(),
        };
        let is_default = config.providers.default == id.as_str();

        let status = if configured {
            match id.env_key() {
                Some(_) => format!("{} (key set)", "✓".green()),
                None => format!("{} {}", "✓".green(), config.providers.ollama.host.dimmed()),
            }
        } else {
            format!(
                "{} set {}",
                "· not configured".dimmed(),
                id.env_key().unwrap_or_default().dimmed()
            )
        };
        let marker = if is_default { " (default)".bold().to_string() } else { String::new() };
        println!("    {:<20} {}{}", id.display_name(), status, marker);
    }

    println!();

    Ok(())
}
