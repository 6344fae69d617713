//! Google API error data models
//!
//! Successful Custom Search responses are passed through untouched; only the
//! error envelope is modeled so failures can be classified.

use serde::Deserialize;

/// Error envelope returned by Google APIs on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

/// Body of the error envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub message: Option<String>,
    /// Canonical status such as `INVALID_ARGUMENT` or `RESOURCE_EXHAUSTED`
    #[serde(default)]
    pub status: Option<String>,
    /// Legacy per-error details
    #[serde(default)]
    pub errors: Vec<GoogleErrorDetail>,
    /// Structured details (`google.rpc.ErrorInfo` and friends)
    #[serde(default)]
    pub details: Vec<GoogleErrorInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorInfo {
    #[serde(default)]
    pub reason: Option<String>,
}

impl GoogleError {
    /// All machine-readable reasons and statuses, for classification
    pub fn reasons(&self) -> Vec<&str> {
        self.status
            .as_deref()
            .into_iter()
            .chain(self.errors.iter().filter_map(|e| e.reason.as_deref()))
            .chain(self.details.iter().filter_map(|d| d.reason.as_deref()))
            .collect()
    }

    /// Human-readable message, falling back to the first detail message
    pub fn display_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or_else(|| self.errors.iter().find_map(|e| e.message.as_deref()))
    }
}
