pub mod error;
pub mod handlers;
pub mod models;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api_server::models::GenerationParams;
use crate::llm_engine::OllamaEngine;
use crate::util::cmd::Args;

/// Shared state behind every handler: the engine client plus immutable
/// configuration. Nothing here mutates across requests.
pub struct GatewayServer {
    pub engine: OllamaEngine,
    pub model: String,
    pub inference_defaults: GenerationParams,
    pub chat_defaults: GenerationParams,
}

impl GatewayServer {
    pub fn new(args: &Args) -> Self {
        Self {
            engine: OllamaEngine::new(args.engine_base_url()),
            model: args.model.clone(),
            inference_defaults: GenerationParams {
                max_tokens: args.max_tokens,
                temperature: args.temperature,
                top_p: args.top_p,
            },
            chat_defaults: GenerationParams {
                max_tokens: args.chat_max_tokens,
                temperature: args.chat_temperature,
                top_p: args.top_p,
            },
        }
    }

    /// Run the gateway until SIGINT/SIGTERM.
    pub async fn run(self: Arc<Self>, port: u16) -> Result<()> {
        let app = self.create_router().await;
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

        info!("Gateway listening on port {}", port);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }

    /// Create the API router for the gateway endpoints.
    pub async fn create_router(self: Arc<Self>) -> Router {
        let state = Arc::clone(&self);
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/models", get(handlers::list_models))
            .route("/model/:name", get(handlers::model_info))
            .route("/inference", post(handlers::inference))
            .route("/chat", post(handlers::chat))
            .route("/load-model", post(handlers::load_model))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to create SIGTERM listener");
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to create SIGINT listener");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C, shutting down gracefully...");
    }
}
