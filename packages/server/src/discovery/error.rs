//! Discovery error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::kernel::EngineConfigError;

/// Everything that can go wrong while handling a discovery request.
///
/// Display strings double as the client-facing `error` field, so they are
/// part of the API contract and must stay stable.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Request body failed deserialization or validation.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Required engine credentials are absent from the environment.
    #[error("Server configuration error: {0}")]
    Configuration(#[from] EngineConfigError),

    /// Submission to the engine failed before a job existed.
    #[error("Failed to process discovery request")]
    SubmitFailed(#[source] anyhow::Error),

    /// A status poll failed; the job is abandoned without retry.
    #[error("Failed to process discovery request")]
    FetchFailed(#[source] anyhow::Error),

    #[error("Workflow execution failed")]
    WorkflowFailed,

    #[error("Workflow execution timed out")]
    WorkflowTimeout,

    /// The execution succeeded but its output does not match the contract.
    /// The inner string is the decode failure, returned as `details`.
    #[error("Invalid workflow output format")]
    MalformedOutput(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for DiscoveryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DiscoveryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DiscoveryError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Upstream failure causes go to the client as `details`; internal
        // classifications (failed, timed out) expose the headline only.
        let details = match &self {
            DiscoveryError::SubmitFailed(source) | DiscoveryError::FetchFailed(source) => {
                Some(format!("{source:#}"))
            }
            DiscoveryError::MalformedOutput(reason) => Some(reason.clone()),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self,
                details = ?details,
                "Discovery request failed"
            );
        }

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
