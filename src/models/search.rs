//! Search result data models
//!
//! A search either yields the provider's response body untouched or a
//! failure carrying a message and a coarse category. The flat
//! `{"error": "..."}` rendering is produced by [`SearchOutcome::to_json`].

use crate::core::constants::ERROR_KEY;
use crate::core::provider::SearchError;
use serde_json::{Map, Value};
use std::fmt;

/// Coarse failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Configuration,
    Network,
    Auth,
    Quota,
    Other,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureCategory::Configuration => "configuration",
            FailureCategory::Network => "network",
            FailureCategory::Auth => "auth",
            FailureCategory::Quota => "quota",
            FailureCategory::Other => "other",
        };
        f.write_str(name)
    }
}

/// Result of one search invocation
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The provider's response body, unmodified
    Success(Value),
    /// Any failure along the way
    Failure {
        category: FailureCategory,
        message: String,
    },
}

impl SearchOutcome {
    /// Build a failure outcome
    pub fn failure(category: FailureCategory, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("{category} failure")
        } else {
            message
        };
        SearchOutcome::Failure { category, message }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }

    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::Failure { category, .. } => Some(*category),
        }
    }

    /// Number of entries in the response's `items` array
    pub fn item_count(&self) -> usize {
        match self {
            SearchOutcome::Success(body) => body
                .get("items")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            SearchOutcome::Failure { .. } => 0,
        }
    }

    /// Render as a single line of JSON
    ///
    /// Success renders the response body; failure renders exactly
    /// `{"error": "<message>"}`.
    pub fn to_json(&self) -> String {
        let rendered = match self {
            SearchOutcome::Success(body) => serde_json::to_string(body),
            SearchOutcome::Failure { message, .. } => {
                let mut envelope = Map::new();
                envelope.insert(ERROR_KEY.to_string(), Value::String(message.clone()));
                serde_json::to_string(&Value::Object(envelope))
            }
        };

        rendered.unwrap_or_else(|_| r#"{"error":"failed to serialize search result"}"#.to_string())
    }
}

impl From<SearchError> for SearchOutcome {
    fn from(err: SearchError) -> Self {
        SearchOutcome::failure(err.category(), err.to_string())
    }
}

impl From<Result<Value, SearchError>> for SearchOutcome {
    fn from(result: Result<Value, SearchError>) -> Self {
        match result {
            Ok(body) => SearchOutcome::Success(body),
            Err(err) => err.into(),
        }
    }
}
