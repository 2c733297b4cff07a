//! `caseforge init` — write the default config and create the data layout.

use anyhow::Result;
use colored::Colorize;

use caseforge_core::config::{get_config_path, load_config, save_config};
use caseforge_core::utils::{get_data_path, get_reports_path};

/// Run the init command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "📊 Caseforge — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults + any env overrides
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. Ensure data + reports directories
    let data_dir = get_data_path();
    std::fs::create_dir_all(&data_dir)?;
    let reports_dir = get_reports_path();
    std::fs::create_dir_all(&reports_dir)?;
    println!("  {} reports dir at {}", "✓".green(), reports_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Run `caseforge serve` to start the API.".green()
    );
    println!();

    Ok(())
}
