//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::discovery::PollConfig;
use crate::server::routes::{discover_handler, discover_method_not_allowed, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub poll: PollConfig,
}

/// Build the Axum application router
///
/// Engine credentials are not checked here; each discovery request builds
/// its own engine and reports missing configuration as a request error.
pub fn build_app(config: Config, poll: PollConfig) -> Router {
    let app_state = AppState {
        config: Arc::new(config),
        poll,
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/discover",
            post(discover_handler).fallback(discover_method_not_allowed),
        )
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
