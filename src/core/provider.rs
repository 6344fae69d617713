//! Search provider abstraction
//!
//! This module defines the trait implemented by search backends and the
//! error type every failure along the search path is expressed in.

use crate::models::search::FailureCategory;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error types for search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    /// Coarse classification of the failure
    pub fn category(&self) -> FailureCategory {
        match self {
            SearchError::MissingCredential(_) | SearchError::ClientBuild(_) => {
                FailureCategory::Configuration
            }
            SearchError::Network(_) | SearchError::Timeout => FailureCategory::Network,
            SearchError::Authentication(_) => FailureCategory::Auth,
            SearchError::Quota(_) => FailureCategory::Quota,
            SearchError::BadRequest(_)
            | SearchError::Api { .. }
            | SearchError::MalformedResponse(_) => FailureCategory::Other,
        }
    }
}

/// Display text of `err` followed by its source chain
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        // the request URL carries the API key
        let err = err.without_url();
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_builder() {
            SearchError::ClientBuild(describe(&err))
        } else if err.is_decode() {
            SearchError::MalformedResponse(describe(&err))
        } else {
            SearchError::Network(describe(&err))
        }
    }
}

/// Trait for web search backends
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search against the engine `cse_id` and return the raw body
    async fn list(&self, query: &str, cse_id: &str) -> Result<Value, SearchError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
