//! Search invocation
//!
//! [`SearchInvoker`] turns a query into a [`SearchOutcome`]. It never
//! returns an error and never panics on input: every failure, including
//! missing credentials, is folded into the outcome.

use crate::core::client::CustomSearchClient;
use crate::core::config::Config;
use crate::core::constants::env;
use crate::core::provider::{SearchError, SearchProvider};
use crate::models::search::SearchOutcome;
use serde_json::Value;
use tracing::{info, warn};

/// Runs single searches with explicitly resolved configuration
pub struct SearchInvoker {
    config: Config,
}

impl SearchInvoker {
    /// Create a new invoker with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Search for `query`
    ///
    /// A fresh HTTP client is built for every call; nothing is cached, so two
    /// calls with the same query issue two requests.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let outcome = SearchOutcome::from(self.try_search(query).await);

        if outcome.is_success() {
            info!("Search returned {} item(s)", outcome.item_count());
        } else if let Some(category) = outcome.category() {
            warn!("Search failed [{}]: {}", category, outcome.to_json());
        }

        outcome
    }

    /// Search for `query` and render the flat JSON text
    pub async fn search_json(&self, query: &str) -> String {
        self.search(query).await.to_json()
    }

    async fn try_search(&self, query: &str) -> Result<Value, SearchError> {
        let credentials = &self.config.credentials;
        let api_key = credentials
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingCredential(env::GOOGLE_API_KEY))?;
        let cse_id = credentials
            .cse_id
            .as_deref()
            .ok_or(SearchError::MissingCredential(env::GOOGLE_CSE_ID))?;

        let client = CustomSearchClient::new(
            api_key.to_string(),
            self.config.base_url.clone(),
            self.config.request_timeout,
        )?;

        execute(&client, query, cse_id).await
    }
}

/// Issue one `list` call through `provider`
pub async fn execute<P: SearchProvider + ?Sized>(
    provider: &P,
    query: &str,
    cse_id: &str,
) -> Result<Value, SearchError> {
    info!("Using provider: {}", provider.provider_name());
    provider.list(query, cse_id).await
}
