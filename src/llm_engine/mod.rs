pub mod ollama_engine;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const OLLAMA_DEFAULT_PORT: u16 = 11434;

// Per-call timeouts. Pulls get no client-side cap; large models take
// minutes to download.
pub(crate) const VERSION_TIMEOUT_SECS: u64 = 5;
pub(crate) const TAGS_TIMEOUT_SECS: u64 = 10;
pub(crate) const GENERATE_TIMEOUT_SECS: u64 = 60;

/// What went wrong talking to the engine, split by who is to blame.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process is not reachable at all.
    #[error("inference engine unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The engine accepted the connection but the call ran out of time.
    #[error("inference engine timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("inference engine returned {status}: {message}")]
    Failure { status: u16, message: String },

    /// The engine answered 2xx but the body did not parse.
    #[error("invalid engine response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout(err)
        } else if err.is_decode() {
            EngineError::InvalidResponse(err)
        } else {
            EngineError::Unreachable(err)
        }
    }
}

/// Sampling options block of the engine's generate call.
#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    pub num_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Body of POST /api/generate.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// What the engine answers a generate call with. Timing fields are only
/// present once generation actually ran on the engine.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub model: Option<String>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    pub total_duration: Option<u64>,
    pub load_duration: Option<u64>,
    pub prompt_eval_count: Option<u64>,
    pub prompt_eval_duration: Option<u64>,
    pub eval_count: Option<u64>,
    pub eval_duration: Option<u64>,
}

/// HTTP client for a locally running Ollama-compatible engine.
pub struct OllamaEngine {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}
