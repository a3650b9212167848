//! Kernel module - server infrastructure and dependencies.

pub mod engine;

pub use engine::*;
