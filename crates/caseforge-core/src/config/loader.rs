//! Config loader — reads `~/.caseforge/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.caseforge/config.json`
//! 3. Environment variables (override JSON)
//!
//! Env vars come in two forms: the plain names the deployment uses
//! (`GEMINI_API_KEY`, `OLLAMA_HOST`, `DEFAULT_PROVIDER`, …) and
//! `CASEFORGE_<SECTION>__<FIELD>` for server/storage settings.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
fn apply_env_overrides(mut config: Config) -> Config {
    // Provider selection + credentials (plain names, stripped of whitespace)
    if let Some(val) = env_trimmed("DEFAULT_PROVIDER") {
        config.providers.default = val.to_lowercase();
    }
    if let Some(val) = env_trimmed("GEMINI_API_KEY") {
        config.providers.gemini.api_key = val;
    }
    if let Some(val) = env_trimmed("GEMINI_MODEL") {
        config.providers.gemini.model = val;
    }
    if let Some(val) = env_trimmed("GROQ_API_KEY") {
        config.providers.groq.api_key = val;
    }
    if let Some(val) = env_trimmed("GROQ_MODEL") {
        config.providers.groq.model = val;
    }
    if let Some(val) = env_trimmed("OLLAMA_HOST") {
        config.providers.ollama.host = val;
    }
    if let Some(val) = env_trimmed("OLLAMA_MODEL") {
        config.providers.ollama.model = val;
    }

    // Server
    if let Ok(val) = std::env::var("CASEFORGE_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("CASEFORGE_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }

    // Storage
    if let Ok(val) = std::env::var("CASEFORGE_STORAGE__DB_PATH") {
        config.storage.db_path = val;
    }
    if let Ok(val) = std::env::var("CASEFORGE_STORAGE__REPORTS_DIR") {
        config.storage.reports_dir = val;
    }

    // Generation defaults
    if let Ok(val) = std::env::var("CASEFORGE_GENERATION__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.generation.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("CASEFORGE_GENERATION__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.generation.max_tokens = n;
        }
    }

    config
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.providers.default, "ollama");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "providers": {
                "default": "groq",
                "groq": { "apiKey": "gsk-123", "model": "llama-3.1-70b-versatile" }
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.providers.default, "groq");
        assert_eq!(config.providers.groq.api_key, "gsk-123");
        assert_eq!(config.providers.groq.model, "llama-3.1-70b-versatile");
        // Default preserved
        assert_eq!(config.providers.ollama.model, "llama3");
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.providers.gemini.api_key = "g-test".to_string();
        config.server.port = 9000;

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.providers.gemini.api_key, "g-test");
        assert_eq!(reloaded.server.port, 9000);
    }

    #[test]
    fn test_env_override_default_provider() {
        std::env::set_var("DEFAULT_PROVIDER", " Gemini ");
        let config = apply_env_overrides(Config::default());
        // Lower-cased and trimmed
        assert_eq!(config.providers.default, "gemini");
        std::env::remove_var("DEFAULT_PROVIDER");
    }

    #[test]
    fn test_env_override_api_key_trimmed() {
        std::env::set_var("GROQ_API_KEY", "  gsk-env  ");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.groq.api_key, "gsk-env");
        std::env::remove_var("GROQ_API_KEY");
    }

    #[test]
    fn test_env_override_server_port() {
        std::env::set_var("CASEFORGE_SERVER__PORT", "9999");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.server.port, 9999);
        std::env::remove_var("CASEFORGE_SERVER__PORT");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["providers"]["gemini"].get("apiKey").is_some());
        assert!(raw["providers"]["gemini"].get("api_key").is_none());
    }
}
