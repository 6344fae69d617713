//! Google Custom Search client
//!
//! This module provides the HTTP client for the Custom Search JSON API v1
//! `list` method. Successful bodies are returned as-is; error bodies are
//! classified into [`SearchError`] variants.
//!
//! The API key travels as a query parameter, so it is never logged and is
//! stripped from transport errors.

use crate::core::constants::{endpoint, param};
use crate::core::provider::{SearchError, SearchProvider};
use crate::models::google::GoogleErrorEnvelope;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest slice of a non-JSON error body kept in messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Custom Search API client
pub struct CustomSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CustomSearchClient {
    /// Create a new Custom Search client
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google API key
    /// * `base_url` - API host, e.g. `https://www.googleapis.com`
    /// * `timeout` - Request timeout in seconds; `None` keeps the reqwest default
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: Option<u64>,
    ) -> Result<Self, SearchError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SearchError::ClientBuild(e.without_url().to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn list_url(&self) -> String {
        format!("{}{}", self.base_url, endpoint::LIST_PATH)
    }

    /// Classify a non-2xx response
    ///
    /// Reasons in the Google error envelope win over the bare status code:
    /// a 403 carrying `dailyLimitExceeded` is a quota failure, a 400 carrying
    /// `API_KEY_INVALID` is an authentication failure.
    fn classify_error(status: u16, body: &str) -> SearchError {
        let parsed = serde_json::from_str::<GoogleErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error);

        let message = match parsed.as_ref().and_then(|e| e.display_message()) {
            Some(message) => message.to_string(),
            None if body.trim().is_empty() => format!("HTTP status {status}"),
            None => body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
        };

        let mut hints = message.to_lowercase();
        if let Some(error) = &parsed {
            for reason in error.reasons() {
                hints.push(' ');
                hints.push_str(&reason.to_lowercase());
            }
        }

        let quota = ["quota", "ratelimit", "rate_limit", "resource_exhausted", "limitexceeded"]
            .iter()
            .any(|needle| hints.contains(needle));
        if quota || status == 429 {
            return SearchError::Quota(message);
        }

        let auth = [
            "api_key_invalid",
            "api key not valid",
            "keyinvalid",
            "unauthenticated",
            "permission_denied",
            "accessnotconfigured",
            "service_disabled",
        ]
        .iter()
        .any(|needle| hints.contains(needle));
        if auth || status == 401 || status == 403 {
            return SearchError::Authentication(message);
        }

        match status {
            400 => SearchError::BadRequest(message),
            _ => SearchError::Api { status, message },
        }
    }
}

#[async_trait]
impl SearchProvider for CustomSearchClient {
    async fn list(&self, query: &str, cse_id: &str) -> Result<Value, SearchError> {
        info!(
            "Sending Custom Search request: query_length={}",
            query.chars().count()
        );

        let response = self
            .client
            .get(self.list_url())
            .query(&[
                (param::KEY, self.api_key.as_str()),
                (param::CX, cse_id),
                (param::QUERY, query),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            "Custom Search responded: status={}, body_length={}",
            status,
            body.len()
        );

        if !status.is_success() {
            let err = Self::classify_error(status.as_u16(), &body);
            warn!("Custom Search request failed (status {}): {}", status, err);
            return Err(err);
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            SearchError::MalformedResponse(format!("Failed to parse response body: {e}"))
        })?;

        Ok(parsed)
    }

    fn provider_name(&self) -> &str {
        "google-custom-search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Option<u64>) -> CustomSearchClient {
        CustomSearchClient::new("test-key".to_string(), server.uri(), timeout).unwrap()
    }

    fn google_error(code: u16, message: &str, status: &str, reason: &str) -> Value {
        json!({
            "error": {
                "code": code,
                "message": message,
                "errors": [{"message": message, "domain": "usageLimits", "reason": reason}],
                "status": status
            }
        })
    }

    #[tokio::test]
    async fn test_list_sends_parameters_and_passes_body_through() {
        let server = MockServer::start().await;
        let body = json!({
            "kind": "customsearch#search",
            "items": [
                {"title": "ABC123 | Datasheet", "link": "https://example.com/a"},
                {"title": "ABC123 - Distributor", "link": "https://example.com/b"}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "cx-1"))
            .and(query_param("q", "ABC123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, None).list("ABC123", "cx-1").await.unwrap();
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_list_encodes_unusual_queries() {
        let server = MockServer::start().await;
        let query = "R 10k & \"5%\" ?#\u{7}";

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, None).list(query, "cx-1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_key_is_authentication_error() {
        let server = MockServer::start().await;
        let mut body = google_error(
            400,
            "API key not valid. Please pass a valid API key.",
            "INVALID_ARGUMENT",
            "badRequest",
        );
        body["error"]["details"] = json!([
            {"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}
        ]);

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(body))
            .mount(&server)
            .await;

        let err = client_for(&server, None).list("ABC123", "cx-1").await.unwrap_err();
        assert!(matches!(err, SearchError::Authentication(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_daily_limit_is_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(google_error(
                403,
                "This API requires billing to be enabled on the project.",
                "PERMISSION_DENIED",
                "dailyLimitExceeded",
            )))
            .mount(&server)
            .await;

        let err = client_for(&server, None).list("ABC123", "cx-1").await.unwrap_err();
        assert!(matches!(err, SearchError::Quota(_)));
    }

    #[tokio::test]
    async fn test_too_many_requests_is_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string(""))
            .mount(&server)
            .await;

        let err = client_for(&server, None).list("ABC123", "cx-1").await.unwrap_err();
        assert!(matches!(err, SearchError::Quota(ref m) if m == "HTTP status 429"));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server, None).list("ABC123", "cx-1").await.unwrap_err();
        match err {
            SearchError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "backend unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, None).list("ABC123", "cx-1").await.unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Some(1)).list("ABC123", "cx-1").await.unwrap_err();
        assert!(matches!(err, SearchError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error_without_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            CustomSearchClient::new("secret-key-42".to_string(), format!("http://{addr}"), None)
                .unwrap();
        let err = client.list("ABC123", "cx-1").await.unwrap_err();

        assert!(matches!(err, SearchError::Network(_)));
        let message = err.to_string();
        assert!(!message.contains("secret-key-42"));
        // the transport cause is kept, not just "error sending request"
        assert!(message.to_lowercase().contains("connect"));
    }

    #[test]
    fn test_classify_plain_bad_request() {
        let err = CustomSearchClient::classify_error(
            400,
            &google_error(400, "Invalid Value", "INVALID_ARGUMENT", "invalid").to_string(),
        );
        assert!(matches!(err, SearchError::BadRequest(ref m) if m == "Invalid Value"));
    }

    #[test]
    fn test_classify_truncates_long_bodies() {
        let body = "x".repeat(1000);
        match CustomSearchClient::classify_error(502, &body) {
            SearchError::Api { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY_CHARS),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_url_strips_trailing_slash() {
        let client =
            CustomSearchClient::new("k".into(), "http://localhost:8080/".into(), None).unwrap();
        assert_eq!(client.list_url(), "http://localhost:8080/customsearch/v1");
    }
}
