//! Pure Julep REST API client.
//!
//! A minimal client for the Julep platform API. Supports creating task
//! executions and fetching their status and output while they run.
//!
//! # Example
//!
//! ```rust,ignore
//! use julep_client::JulepClient;
//!
//! let client = JulepClient::new("your-api-key".into());
//!
//! let execution = client
//!     .create_execution("task-id", serde_json::json!({ "topics": ["rust"] }))
//!     .await?;
//!
//! let latest = client.get_execution(&execution.id).await?;
//! println!("{}", latest.status);
//! ```

pub mod error;
pub mod types;

pub use error::{JulepError, Result};
pub use types::{CreateExecutionRequest, Execution};

const BASE_URL: &str = "https://api.julep.ai/api";

#[derive(Debug)]
pub struct JulepClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl JulepClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for self-hosted deployments or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Start a task execution. Returns immediately with execution metadata.
    pub async fn create_execution(
        &self,
        task_id: &str,
        input: serde_json::Value,
    ) -> Result<Execution> {
        let url = format!("{}/tasks/{}/executions", self.base_url, task_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CreateExecutionRequest { input })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(JulepError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let execution: Execution = resp
            .json()
            .await
            .map_err(|e| JulepError::Parse(e.to_string()))?;
        tracing::info!(execution_id = %execution.id, task_id, "Julep execution created");
        Ok(execution)
    }

    /// Fetch the current state of an execution.
    pub async fn get_execution(&self, execution_id: &str) -> Result<Execution> {
        let url = format!("{}/executions/{}", self.base_url, execution_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(JulepError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let execution: Execution = resp
            .json()
            .await
            .map_err(|e| JulepError::Parse(e.to_string()))?;
        tracing::debug!(
            execution_id = %execution.id,
            status = %execution.status,
            "Fetched Julep execution"
        );
        Ok(execution)
    }
}
