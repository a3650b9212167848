// HTTP server setup (Axum + REST)
pub mod app;
pub mod routes;

pub use app::*;
