//! Workflow engine seam.
//!
//! The discovery domain talks to the remote workflow engine through
//! [`BaseWorkflowEngine`]. [`JulepEngine`] is the production implementation
//! over the Julep REST API; tests substitute scripted engines.

use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use julep_client::JulepClient;
use thiserror::Error;

use crate::config::Config;

/// Opaque identifier for a submitted workflow run.
///
/// Owned by the orchestrator for the lifetime of one request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(pub String);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Map an engine-reported status string.
    ///
    /// Unrecognized states (the engine adds states over time, and also emits
    /// `cancelled`) are treated as non-terminal: polling continues until
    /// succeeded, failed, or the caller's deadline.
    pub fn from_engine(status: &str) -> Self {
        match status {
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            "running" | "awaiting_input" => JobStatus::Running,
            _ => JobStatus::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// One observation of a workflow run.
#[derive(Debug, Clone)]
pub struct JobState {
    pub status: JobStatus,
    pub output: Option<serde_json::Value>,
    /// Engine-side failure detail. Logged, never returned to callers.
    pub error: Option<String>,
}

/// Raised before any network call when engine credentials are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineConfigError {
    #[error("Missing API key")]
    MissingApiKey,
    #[error("Missing task ID")]
    MissingTaskId,
}

#[async_trait]
pub trait BaseWorkflowEngine: Send + Sync {
    /// Submit a workflow run with the given input. Returns an opaque handle.
    async fn submit(&self, input: serde_json::Value) -> Result<JobHandle>;

    /// Fetch the current state of a previously submitted run.
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobState>;
}

/// Julep-backed workflow engine.
#[derive(Debug)]
pub struct JulepEngine {
    client: JulepClient,
    task_id: String,
}

impl JulepEngine {
    /// Build an engine from config. Fails when the API key or task id is
    /// absent; the API key is checked first.
    pub fn from_config(config: &Config) -> Result<Self, EngineConfigError> {
        let api_key = config
            .julep_api_key
            .clone()
            .ok_or(EngineConfigError::MissingApiKey)?;
        let task_id = config
            .julep_task_id
            .clone()
            .ok_or(EngineConfigError::MissingTaskId)?;

        let mut client = JulepClient::new(api_key);
        if let Some(base_url) = &config.julep_base_url {
            client = client.with_base_url(base_url.clone());
        }

        Ok(Self { client, task_id })
    }
}

#[async_trait]
impl BaseWorkflowEngine for JulepEngine {
    async fn submit(&self, input: serde_json::Value) -> Result<JobHandle> {
        let execution = self
            .client
            .create_execution(&self.task_id, input)
            .await
            .context("Failed to create Julep execution")?;

        if execution.id.is_empty() {
            anyhow::bail!("Julep returned an execution with no id");
        }

        Ok(JobHandle(execution.id))
    }

    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobState> {
        let execution = self
            .client
            .get_execution(&handle.0)
            .await
            .context("Failed to fetch Julep execution")?;

        Ok(JobState {
            status: JobStatus::from_engine(&execution.status),
            output: execution.output,
            error: execution.error,
        })
    }
}
