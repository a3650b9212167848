//! Normalization of raw engine output into the public response contract.

use serde_json::Value;

use super::error::DiscoveryError;
use super::models::DiscoveryResult;

/// Decode the output of a succeeded workflow execution.
///
/// The engine reports output as free-form JSON; a succeeded execution is
/// only usable if that JSON carries a `final_output` array of stories.
/// Anything else is a contract violation surfaced as
/// [`DiscoveryError::MalformedOutput`].
pub fn normalize_output(output: Option<Value>) -> Result<DiscoveryResult, DiscoveryError> {
    let output = output.ok_or_else(|| {
        DiscoveryError::MalformedOutput("execution succeeded but returned no output".to_string())
    })?;

    serde_json::from_value(output).map_err(|e| DiscoveryError::MalformedOutput(e.to_string()))
}
