//! Configuration — typed schema + loader.
//!
//! Loading precedence: defaults → JSON file → environment variables.

pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, save_config};
pub use schema::{
    Config, GeminiConfig, GenerationDefaults, GroqConfig, OllamaConfig, ProvidersConfig,
    ServerConfig, StorageConfig,
};
