use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of POST /inference and POST /chat.
#[derive(Debug, Deserialize)]
pub struct GenerationRequest {
    /// A missing prompt deserializes empty and is rejected by `validate`.
    #[serde(default)]
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// Accepted as a hint only; the reply is always delivered in one piece.
    pub stream: Option<bool>,
}

/// Resolved generation knobs; also used as the per-route defaults.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationRequest {
    /// Reject bad input before anything is sent upstream.
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        if self.max_tokens == Some(0) {
            return Err("max_tokens must be a positive integer".to_string());
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("temperature must be within [0, 1], got {}", t));
            }
        }
        if let Some(p) = self.top_p {
            if p <= 0.0 || p > 1.0 {
                return Err(format!("top_p must be within (0, 1], got {}", p));
            }
        }
        Ok(())
    }

    /// Explicit values pass through unchanged; omitted ones take the route
    /// defaults.
    pub fn resolve(&self, defaults: GenerationParams) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
        }
    }
}

/// Body returned by the generation endpoints.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub response: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub engine_status: String,
    pub model_loaded: bool,
    pub available_models: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoadModelRequest {
    #[serde(default)]
    pub model_name: String,
}

#[derive(Debug, Serialize)]
pub struct LoadModelResponse {
    pub model_name: String,
    pub status: String,
    pub message: String,
}

/// Details for one model, shaped from the engine's show call.
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub size: u64,
    pub digest: String,
    pub details: Value,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub model: String,
    pub status: String,
}
