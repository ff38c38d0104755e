use crate::api::types::{HealthStatus, ListResponse, SingleResponse, Tweet};
use crate::api::{ApiClientError, TweetApiClient};

impl TweetApiClient {
    /// Fetch a single tweet by ID, with its related entities.
    pub async fn get_tweet(&mut self, tweet_id: &str) -> Result<SingleResponse<Tweet>, ApiClientError> {
        self.get_cached(&format!("/2/tweet/{tweet_id}")).await
    }

    /// Fetch all available tweets. An empty list is a valid success.
    pub async fn get_tweets(&mut self) -> Result<ListResponse<Tweet>, ApiClientError> {
        self.get_cached("/tweets").await
    }

    /// Convenience projection over [`Self::get_tweets`]: just the IDs.
    pub async fn get_tweet_ids(&mut self) -> Result<Vec<String>, ApiClientError> {
        let resp = self.get_tweets().await?;
        Ok(resp
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| tweet.id)
            .collect())
    }

    /// Liveness probe. Never cached, never throttled.
    pub async fn health_check(&self) -> Result<HealthStatus, ApiClientError> {
        self.get_json("/health").await
    }
}
