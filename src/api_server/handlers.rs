use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info};

use super::error::ApiError;
use super::models::{
    GenerationParams, GenerationRequest, GenerationResponse, HealthResponse, LoadModelRequest,
    LoadModelResponse, ModelInfo, ServiceInfo,
};
use super::GatewayServer;
use crate::llm_engine::{EngineError, GenerateOptions, GenerateRequest};

/// GET / - service metadata.
pub async fn root(State(server): State<Arc<GatewayServer>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "llm-gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: server.model.clone(),
        status: "running".to_string(),
    })
}

/// GET /health - never fails; upstream trouble degrades the status instead.
pub async fn health(State(server): State<Arc<GatewayServer>>) -> Json<HealthResponse> {
    let engine_up = server.engine.version().await.is_ok();
    let available_models = if engine_up {
        server.engine.list_models().await.unwrap_or_default()
    } else {
        Vec::new()
    };
    let model_loaded = available_models.iter().any(|m| m == &server.model);

    let (status, message, engine_status) = if engine_up && model_loaded {
        (
            "healthy",
            format!("Service is running and {} is available", server.model),
            "running",
        )
    } else if engine_up {
        (
            "partial",
            format!("Engine is running but {} is not available", server.model),
            "running",
        )
    } else {
        (
            "unhealthy",
            "Inference engine is not responding".to_string(),
            "not responding",
        )
    };

    Json(HealthResponse {
        status: status.to_string(),
        message,
        engine_status: engine_status.to_string(),
        model_loaded,
        available_models,
    })
}

/// GET /models - model names exactly as the engine reports them.
pub async fn list_models(
    State(server): State<Arc<GatewayServer>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let models = server.engine.list_models().await?;
    Ok(Json(models))
}

/// GET /model/:name - details for one model; 404 when the engine does not
/// know it.
pub async fn model_info(
    State(server): State<Arc<GatewayServer>>,
    Path(name): Path<String>,
) -> Result<Json<ModelInfo>, ApiError> {
    let data = match server.engine.show_model(&name).await {
        Ok(data) => data,
        Err(EngineError::Failure { status: 404, .. }) => {
            return Err(ApiError::ModelNotFound(name))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(ModelInfo {
        name: data["details"]["name"].as_str().unwrap_or(&name).to_string(),
        size: data["size"].as_u64().unwrap_or(0),
        digest: data["digest"].as_str().unwrap_or_default().to_string(),
        details: data.get("details").cloned().unwrap_or_else(|| json!({})),
    }))
}

/// POST /inference - single-shot generation with the inference defaults.
pub async fn inference(
    State(server): State<Arc<GatewayServer>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    info!("Received inference request: {} prompt chars", request.prompt.len());
    forward_generation(&server, request, server.inference_defaults, false).await
}

/// POST /chat - same contract as /inference with the chat defaults, and the
/// prompt framed as a single user turn. The gateway keeps no conversation
/// state; callers carry prior turns inside the prompt themselves.
pub async fn chat(
    State(server): State<Arc<GatewayServer>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    info!("Received chat request: {} prompt chars", request.prompt.len());
    forward_generation(&server, request, server.chat_defaults, true).await
}

/// POST /load-model - asks the engine to pull the model and blocks until the
/// pull finishes; callers should expect this to take minutes for large
/// models.
pub async fn load_model(
    State(server): State<Arc<GatewayServer>>,
    Json(request): Json<LoadModelRequest>,
) -> Result<Json<LoadModelResponse>, ApiError> {
    if request.model_name.trim().is_empty() {
        return Err(ApiError::Validation("model_name must not be empty".to_string()));
    }

    server.engine.pull_model(&request.model_name).await.map_err(|e| {
        error!("Load of model {} failed: {}", request.model_name, e);
        e
    })?;

    Ok(Json(LoadModelResponse {
        model_name: request.model_name,
        status: "loaded".to_string(),
        message: "Model pulled and ready on the engine".to_string(),
    }))
}

async fn forward_generation(
    server: &GatewayServer,
    request: GenerationRequest,
    defaults: GenerationParams,
    frame_as_chat: bool,
) -> Result<Json<GenerationResponse>, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    if request.stream == Some(true) {
        debug!("stream=true requested; replies are delivered in one piece");
    }

    let params = request.resolve(defaults);
    let prompt = if frame_as_chat {
        frame_chat_prompt(&request.prompt)
    } else {
        request.prompt
    };

    let reply = server
        .engine
        .generate(&GenerateRequest {
            model: server.model.clone(),
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: params.max_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
            },
        })
        .await
        .map_err(|e| {
            error!("Generation request failed: {}", e);
            e
        })?;

    Ok(Json(GenerationResponse {
        response: reply.response,
        model: reply.model.unwrap_or_else(|| server.model.clone()),
        created_at: Utc::now(),
        done: true,
        total_duration: reply.total_duration,
        load_duration: reply.load_duration,
        prompt_eval_count: reply.prompt_eval_count,
        prompt_eval_duration: reply.prompt_eval_duration,
        eval_count: reply.eval_count,
        eval_duration: reply.eval_duration,
    }))
}

/// Wrap a raw prompt as one user turn so instruct models answer in the
/// assistant voice.
fn frame_chat_prompt(prompt: &str) -> String {
    format!(
        "<message role=\"user\">\n{}\n</message>\n<message role=\"assistant\">\n",
        prompt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_framing_wraps_prompt_as_user_turn() {
        let framed = frame_chat_prompt("Hello there");
        assert!(framed.starts_with("<message role=\"user\">"));
        assert!(framed.contains("Hello there"));
        assert!(framed.ends_with("<message role=\"assistant\">\n"));
    }
}
