pub mod cache;
pub mod tweets;
pub mod types;

use std::time::Instant;

use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::cache::{ResponseCache, Throttle};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("not found: {path}")]
    NotFound { path: String },
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("server error (status {status}): {detail}")]
    Server { status: u16, detail: String },
    #[error("deserialization error: {0}")]
    Deserialize(String),
}

impl ApiClientError {
    /// Whether the failure is a transient network/server condition rather
    /// than a definitive not-found. Rate limits count as transient for
    /// control flow, though they are logged distinctly and never retried.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ApiClientError::NotFound { .. })
    }
}

/// Map a non-success HTTP status to the error taxonomy.
fn error_for_status(status: u16, path: &str, detail: String) -> ApiClientError {
    match status {
        404 => ApiClientError::NotFound {
            path: path.to_owned(),
        },
        429 => ApiClientError::RateLimited,
        _ => ApiClientError::Server { status, detail },
    }
}

fn deserialize_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiClientError> {
    serde_json::from_str::<T>(body)
        .map_err(|e| ApiClientError::Deserialize(format!("{e}: {body}")))
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub struct TweetApiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    cache: Option<ResponseCache>,
    throttle: Option<Throttle>,
}

impl TweetApiClient {
    /// Build a plain client. The bearer credential is optional; its absence
    /// is a valid unauthenticated configuration, not an error.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            cache: None,
            throttle: None,
        }
    }

    /// Attach an injected response cache.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach an injected request throttle.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Drop all cache entries. No-op when no cache is attached.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
            tracing::debug!("response cache cleared");
        }
    }

    /// Build a full API URL from a path (e.g. "/2/tweet/123").
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Wait out the throttle interval if a request was dispatched recently.
    async fn throttle_wait(&mut self) {
        if let Some(throttle) = self.throttle.as_mut()
            && let Some(wait) = throttle.delay_until_dispatch(Instant::now())
        {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "throttling request");
            tokio::time::sleep(wait).await;
        }
    }

    /// Issue a GET request without consulting the throttle or cache.
    async fn request_body(&self, path: &str) -> Result<String, ApiClientError> {
        let mut request = self.http_client.get(self.url(path));
        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        let resp = request.send().await?;
        Self::handle_response(path, resp).await
    }

    /// Check the status and return the raw body text.
    async fn handle_response(path: &str, resp: Response) -> Result<String, ApiClientError> {
        let status = resp.status();

        if status.as_u16() == 429 {
            tracing::warn!(path, "rate limit exceeded, propagating without retry");
        }

        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), path, detail));
        }

        Ok(resp.text().await?)
    }

    /// GET returning the deserialized body, bypassing the cache and the
    /// throttle. Only the liveness probe goes through here; it must answer
    /// promptly even while tweet fetches are being spaced out.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiClientError> {
        let body = self.request_body(path).await?;
        deserialize_body(&body)
    }

    /// Throttled GET consulting the response cache first. A non-expired
    /// entry for the endpoint path is returned verbatim without a network
    /// call; otherwise the fetched body is stored under that path.
    pub(crate) async fn get_cached<T: DeserializeOwned>(
        &mut self,
        path: &str,
    ) -> Result<T, ApiClientError> {
        if let Some(ref cache) = self.cache
            && let Some(body) = cache.get(path, Instant::now())
        {
            tracing::debug!(path, "cache hit");
            return deserialize_body(body);
        }

        self.throttle_wait().await;
        let body = self.request_body(path).await?;
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(path, body.clone(), Instant::now());
        }
        deserialize_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_404_maps_to_not_found() {
        let err = error_for_status(404, "/2/tweet/999", String::new());
        assert!(matches!(err, ApiClientError::NotFound { ref path } if path == "/2/tweet/999"));
        assert!(!err.is_transient());
    }

    #[test]
    fn status_429_maps_to_rate_limited_and_is_transient() {
        let err = error_for_status(429, "/tweets", String::new());
        assert!(matches!(err, ApiClientError::RateLimited));
        assert!(err.is_transient());
    }

    #[test]
    fn status_500_maps_to_server_error() {
        let err = error_for_status(500, "/tweets", "boom".into());
        assert!(matches!(err, ApiClientError::Server { status: 500, .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        let client = TweetApiClient::new("http://localhost:8000/", None);
        assert_eq!(client.url("/tweets"), "http://localhost:8000/tweets");
    }

    #[test]
    fn deserialize_error_carries_body() {
        let result: Result<types::HealthStatus, _> = deserialize_body("not json");
        assert!(matches!(result, Err(ApiClientError::Deserialize(_))));
    }

    #[tokio::test]
    async fn health_check_bypasses_throttle() {
        use std::time::Duration;

        // Closed port: each request fails fast with a connection error, so
        // any delay between the calls would come from the throttle.
        let client = TweetApiClient::new("http://127.0.0.1:9", None)
            .with_throttle(Throttle::new(Duration::from_secs(3)));

        let start = Instant::now();
        let _ = client.health_check().await;
        let _ = client.health_check().await;
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "health check waited on the throttle"
        );
    }
}
