//! Request and response models for the discovery domain.

use serde::{Deserialize, Serialize};

use super::error::DiscoveryError;

fn default_min_score() -> u32 {
    50
}

fn default_num_stories() -> u32 {
    10
}

/// Inbound request body for `POST /api/discover`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_num_stories")]
    pub num_stories: u32,
    // Defaults to empty so a missing field is reported as a domain error,
    // not a deserialization failure.
    #[serde(default)]
    pub user_preferences: Vec<String>,
}

impl DiscoverRequest {
    /// Validate and convert into the engine submission payload.
    ///
    /// Runs before any remote interaction; an invalid request never reaches
    /// the engine.
    pub fn into_input(self) -> Result<DiscoveryInput, DiscoveryError> {
        if self.user_preferences.is_empty() {
            return Err(DiscoveryError::InvalidRequest(
                "User preferences are required".to_string(),
            ));
        }
        if self.user_preferences.iter().any(|p| p.trim().is_empty()) {
            return Err(DiscoveryError::InvalidRequest(
                "user_preferences entries must be non-empty".to_string(),
            ));
        }
        if self.min_score < 1 {
            return Err(DiscoveryError::InvalidRequest(
                "min_score must be at least 1".to_string(),
            ));
        }
        if !(1..=50).contains(&self.num_stories) {
            return Err(DiscoveryError::InvalidRequest(
                "num_stories must be between 1 and 50".to_string(),
            ));
        }

        Ok(DiscoveryInput {
            min_score: self.min_score,
            num_stories: self.num_stories,
            user_preferences: self.user_preferences,
        })
    }
}

/// Validated workflow input. Only produced by [`DiscoverRequest::into_input`].
#[derive(Debug, Clone)]
pub struct DiscoveryInput {
    pub min_score: u32,
    pub num_stories: u32,
    pub user_preferences: Vec<String>,
}

impl DiscoveryInput {
    /// Engine-facing task input.
    pub fn to_engine_input(&self) -> serde_json::Value {
        serde_json::json!({
            "min_score": self.min_score,
            "num_stories": self.num_stories,
            "user_preferences": self.user_preferences,
        })
    }
}

/// A story selected and summarized by the workflow.
///
/// Produced only by the engine; the server validates shape but never
/// computes or reorders stories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub url: String,
    pub title: String,
    pub hn_url: String,
    pub summary: String,
    pub comments_count: u64,
}

/// Public response contract for a completed discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub final_output: Vec<Story>,
}
