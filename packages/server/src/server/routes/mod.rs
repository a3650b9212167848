// HTTP routes
pub mod discover;
pub mod health;

pub use discover::*;
pub use health::*;
