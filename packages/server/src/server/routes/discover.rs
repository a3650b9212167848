use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{extract::Extension, Json};

use crate::discovery::{DiscoverRequest, DiscoveryError, DiscoveryResult, DiscoveryService};
use crate::kernel::JulepEngine;
use crate::server::app::AppState;

/// Discovery endpoint
///
/// Validates the request, then runs one workflow execution to completion
/// and returns its normalized output. Validation happens before the engine
/// is built, so a bad request is reported even on a misconfigured server.
pub async fn discover_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<DiscoverRequest>, JsonRejection>,
) -> Result<Json<DiscoveryResult>, DiscoveryError> {
    let Json(request) = payload.map_err(|e| DiscoveryError::InvalidRequest(e.body_text()))?;
    let input = request.into_input()?;

    let engine = JulepEngine::from_config(&state.config)?;
    let service = DiscoveryService::new(Arc::new(engine), state.poll.clone());

    let result = service.discover(input).await?;
    Ok(Json(result))
}

/// Rejects non-POST access to the discovery route.
pub async fn discover_method_not_allowed() -> DiscoveryError {
    DiscoveryError::MethodNotAllowed
}
