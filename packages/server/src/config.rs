use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    // Julep credentials stay optional: absence surfaces per request as a
    // configuration error rather than failing startup.
    pub julep_api_key: Option<String>,
    pub julep_task_id: Option<String>,
    pub julep_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            julep_api_key: env::var("JULEP_API_KEY").ok(),
            julep_task_id: env::var("JULEP_TASK_ID").ok(),
            julep_base_url: env::var("JULEP_BASE_URL").ok(),
        })
    }
}
