//! `caseforge ask` — one-shot generation from the command line.

use anyhow::Result;
use colored::Colorize;

use caseforge_core::config::load_config;
use caseforge_core::extract_json;
use caseforge_core::types::GenerateOptions;
use caseforge_providers::LlmRouter;

/// Send one prompt and print the reply (or its extracted JSON object).
pub async fn run(message: &str, provider: Option<&str>, as_json: bool) -> Result<()> {
    let config = load_config(None);
    let router = LlmRouter::new(&config);
    let id = router.resolve(provider);

    eprintln!("{}", format!("→ {}", id.display_name()).dimmed());

    let options = GenerateOptions::default();
    let reply = router.generate(provider, message, &options).await;

    if as_json {
        let object = extract_json(&reply);
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else if reply.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{reply}");
    }

    Ok(())
}
