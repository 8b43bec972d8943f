use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use llm_gateway::api_server::GatewayServer;
use llm_gateway::util::{cmd::Args, init_logging};

const ENGINE_READY_RETRIES: u8 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse().load_config()?;

    info!(
        "Starting llm-gateway on port {} (engine at {}, model {})",
        args.listen_port,
        args.engine_base_url(),
        args.model
    );

    let server = Arc::new(GatewayServer::new(&args));

    // The engine may still be starting. Serving anyway is fine: requests
    // surface upstream errors until it settles, and /health reports the
    // degraded state.
    match server.engine.wait_until_ready(ENGINE_READY_RETRIES).await {
        Ok(()) => match server.engine.list_models().await {
            Ok(models) if models.iter().any(|m| m == &args.model) => {
                info!("Model {} is available", args.model);
            }
            Ok(models) => {
                warn!(
                    "Model {} is not available. Available models: {:?}",
                    args.model, models
                );
            }
            Err(e) => warn!("Failed to list models: {}", e),
        },
        Err(e) => warn!("Inference engine did not become ready: {}", e),
    }

    server.run(args.listen_port).await
}
