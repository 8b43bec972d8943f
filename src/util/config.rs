use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional TOML configuration. Every field is optional; anything the file
/// omits keeps the command-line (or built-in) value.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub listen_port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    pub addr: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// Generation knobs substituted when a request omits them.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DefaultsConfig {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub chat_max_tokens: Option<u32>,
    pub chat_temperature: Option<f32>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        toml::from_str(&config_str).with_context(|| "Failed to parse config file")
    }
}
