// Hacker News Story Discovery - API Core
//
// This crate provides the backend API for discovering Hacker News stories
// matched to a reader's stated interests. The heavy lifting (story scoring
// and summarization) runs on the Julep workflow engine; this server submits
// a task execution per request and polls it to completion.

pub mod config;
pub mod discovery;
pub mod kernel;
pub mod server;

pub use config::*;
