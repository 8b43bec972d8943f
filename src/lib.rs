//! Thin HTTP gateway in front of a locally running Ollama-compatible
//! inference engine.
//!
//! Provides endpoints for:
//! - GET  /            - service metadata
//! - GET  /health      - gateway and engine liveness
//! - GET  /models      - models available on the engine
//! - GET  /model/:name - details for one model
//! - POST /inference   - single-shot text generation
//! - POST /chat        - chat-framed generation with its own defaults
//! - POST /load-model  - pull a model on the engine (blocks until done)
//!
//! The engine owns model loading and generation; the gateway only validates,
//! forwards and normalizes. Nothing is stored between requests.

pub mod api_server;
pub mod llm_engine;
pub mod util;
