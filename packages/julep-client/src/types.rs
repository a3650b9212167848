use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /tasks/{task_id}/executions`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateExecutionRequest {
    pub input: serde_json::Value,
}

/// A task execution as returned by the Julep API.
///
/// `status` is kept as the raw wire string; the platform adds new states
/// over time and callers decide which ones they treat as terminal.
#[derive(Debug, Clone, Deserialize)]
pub struct Execution {
    pub id: String,
    pub task_id: Option<String>,
    pub status: String,
    pub input: Option<serde_json::Value>,
    pub output: Option<serde_json::Value>,
    pub error: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
