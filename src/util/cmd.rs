use anyhow::{Context, Result};
use clap::Parser;

use crate::llm_engine::OLLAMA_DEFAULT_PORT;
use crate::util::config::Config;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "HTTP gateway for a local LLM inference engine", long_about = None)]
pub struct Args {
    /// Optional TOML config file; values from it override the flags below.
    #[arg(short('f'), long)]
    pub config: Option<String>,

    /// Port the gateway listens on.
    #[arg(long, default_value_t = 8000, env = "PORT")]
    pub listen_port: u16,

    /// Address of the inference engine.
    #[arg(long, default_value = "127.0.0.1", env = "OLLAMA_ADDR")]
    pub engine_addr: String,

    /// Port of the inference engine.
    #[arg(long, default_value_t = OLLAMA_DEFAULT_PORT, env = "OLLAMA_PORT")]
    pub engine_port: u16,

    /// Model requested from the engine.
    #[arg(long, default_value = "gemma2:2b", env = "LLM_MODEL")]
    pub model: String,

    /// Token budget for /inference when the request omits max_tokens.
    #[arg(long, default_value_t = 512)]
    pub max_tokens: u32,

    /// Sampling temperature for /inference when the request omits it.
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    /// Nucleus sampling cutoff when the request omits top_p.
    #[arg(long, default_value_t = 0.9)]
    pub top_p: f32,

    /// Token budget for /chat when the request omits max_tokens.
    #[arg(long, default_value_t = 1024)]
    pub chat_max_tokens: u32,

    /// Sampling temperature for /chat when the request omits it.
    #[arg(long, default_value_t = 0.8)]
    pub chat_temperature: f32,
}

impl Args {
    pub fn load_config(&self) -> Result<Args> {
        if let Some(config_path) = &self.config {
            let config_data = Config::from_file(config_path)
                .with_context(|| format!("Failed to load config from {}", config_path))?;

            Ok(Args {
                config: Some(config_path.clone()),
                listen_port: config_data.server.listen_port.unwrap_or(self.listen_port),
                engine_addr: config_data
                    .engine
                    .addr
                    .unwrap_or_else(|| self.engine_addr.clone()),
                engine_port: config_data.engine.port.unwrap_or(self.engine_port),
                model: config_data.engine.model.unwrap_or_else(|| self.model.clone()),
                max_tokens: config_data.defaults.max_tokens.unwrap_or(self.max_tokens),
                temperature: config_data.defaults.temperature.unwrap_or(self.temperature),
                top_p: config_data.defaults.top_p.unwrap_or(self.top_p),
                chat_max_tokens: config_data
                    .defaults
                    .chat_max_tokens
                    .unwrap_or(self.chat_max_tokens),
                chat_temperature: config_data
                    .defaults
                    .chat_temperature
                    .unwrap_or(self.chat_temperature),
            })
        } else {
            Ok(self.clone())
        }
    }

    pub fn engine_base_url(&self) -> String {
        format!("http://{}:{}", self.engine_addr, self.engine_port)
    }
}
