use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from `MCU_`-prefixed environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// URL serving the production dataset as a JSON array
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// Local JSON dataset file; when set, wins over the URL
    #[serde(default)]
    pub data_path: Option<String>,

    /// Directory holding the durable watched-state file
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Log file path; logging is disabled when unset (the TUI owns the terminal)
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_data_url() -> String {
    "http://localhost:3000/mcu_productions.json".to_string()
}

fn default_store_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mcu-dash")
        .to_string_lossy()
        .into_owned()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("MCU_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
