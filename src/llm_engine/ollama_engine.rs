use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info};

use super::{
    EngineError, GenerateRequest, GenerateResponse, OllamaEngine, GENERATE_TIMEOUT_SECS,
    TAGS_TIMEOUT_SECS, VERSION_TIMEOUT_SECS,
};

impl OllamaEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        OllamaEngine {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GET /api/version - cheap liveness probe.
    pub async fn version(&self) -> Result<String, EngineError> {
        let response = self
            .client
            .get(format!("{}/api/version", self.base_url))
            .timeout(Duration::from_secs(VERSION_TIMEOUT_SECS))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: Value = response.json().await?;
        Ok(body["version"].as_str().unwrap_or_default().to_string())
    }

    /// GET /api/tags - names of the models the engine has downloaded.
    pub async fn list_models(&self) -> Result<Vec<String>, EngineError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(TAGS_TIMEOUT_SECS))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: Value = response.json().await?;
        let models = body["models"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|m| m["name"].as_str().map(String::from))
            .collect();

        Ok(models)
    }

    /// POST /api/generate - one completion, always unstreamed upstream.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, EngineError> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        Ok(response.json::<GenerateResponse>().await?)
    }

    /// POST /api/pull - blocks until the engine finishes pulling the model.
    pub async fn pull_model(&self, model: &str) -> Result<(), EngineError> {
        info!("Pulling model: {}", model);
        let response = self
            .client
            .post(format!("{}/api/pull", self.base_url))
            .json(&serde_json::json!({
                "name": model,
                "stream": false
            }))
            .send()
            .await?;

        Self::check_status(response).await?;
        info!("Successfully pulled model: {}", model);
        Ok(())
    }

    /// POST /api/show - details for one model, as the engine reports them.
    pub async fn show_model(&self, model: &str) -> Result<Value, EngineError> {
        let response = self
            .client
            .post(format!("{}/api/show", self.base_url))
            .timeout(Duration::from_secs(TAGS_TIMEOUT_SECS))
            .json(&serde_json::json!({ "name": model }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Poll the engine until it answers the version probe, giving up after
    /// `max_retries` attempts.
    pub async fn wait_until_ready(&self, max_retries: u8) -> Result<(), EngineError> {
        const RETRY_DELAY: u64 = 2; // seconds

        for attempt in 1..max_retries {
            match self.version().await {
                Ok(version) => {
                    info!("Inference engine is ready (version {})", version);
                    return Ok(());
                }
                Err(e) => {
                    debug!(
                        "Waiting for inference engine (attempt {}/{}): {}",
                        attempt, max_retries, e
                    );
                    sleep(Duration::from_secs(RETRY_DELAY)).await;
                }
            }
        }

        let version = self.version().await?;
        info!("Inference engine is ready (version {})", version);
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EngineError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(EngineError::Failure {
            status: status.as_u16(),
            message,
        })
    }
}
