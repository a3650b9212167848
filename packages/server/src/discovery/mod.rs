//! Discovery domain - request validation, workflow orchestration, and
//! output normalization for Hacker News story discovery.

pub mod error;
pub mod models;
pub mod output;
pub mod service;

pub use error::*;
pub use models::*;
pub use output::*;
pub use service::*;
