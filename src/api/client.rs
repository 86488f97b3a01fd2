//! HTTP client for the statistics backend.
//!
//! # Responsibilities
//! - Resolve endpoint paths against the configured base URL
//! - Encode query parameters and JSON bodies
//! - Tag each request with an `x-request-id`
//! - Surface non-2xx responses as errors without interpreting them

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::api::types::{ApiError, ApiResult, MatchQuery};
use crate::config::ApiConfig;
use crate::observability::metrics;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client for the summoner, match and tier endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Self::with_client(client, &config.base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> ApiResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        tracing::debug!(base_url = %base_url, "API client initialized");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up a player by Riot ID.
    ///
    /// Both values are forwarded verbatim, blanks included.
    pub async fn search_summoner(&self, game_name: &str, tag_line: &str) -> ApiResult<Value> {
        let url = self.endpoint(&["summoner"])?;
        let request = self
            .client
            .get(url)
            .query(&[("gameName", game_name), ("tagLine", tag_line)]);

        self.execute("summoner", request).await
    }

    /// First page of match history: `start=0`, `count=20`, no filter.
    pub async fn get_matches(&self, identifier: &str) -> ApiResult<Value> {
        self.get_matches_with(identifier, &MatchQuery::default()).await
    }

    /// Match history for a player with explicit pagination and filter.
    pub async fn get_matches_with(&self, identifier: &str, query: &MatchQuery) -> ApiResult<Value> {
        let url = self.endpoint(&["matches", identifier])?;
        let request = self.client.get(url).query(&query.to_pairs());

        self.execute("matches", request).await
    }

    /// Batch tier lookup for a set of players.
    ///
    /// The whole sequence goes in one request regardless of its length.
    pub async fn get_tiers<S: AsRef<str>>(&self, identifiers: &[S]) -> ApiResult<Value> {
        let url = self.endpoint(&["tiers"])?;
        let body: Vec<&str> = identifiers.iter().map(AsRef::as_ref).collect();
        let request = self.client.post(url).json(&body);

        self.execute("tiers", request).await
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, endpoint: &'static str, request: RequestBuilder) -> ApiResult<Value> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let result = self.send(request.header(REQUEST_ID_HEADER, request_id.to_string())).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                metrics::record_api_request(endpoint, "success");
                tracing::debug!(%request_id, endpoint, elapsed_ms, "Backend request succeeded");
            }
            Err(ApiError::Status { status, .. }) => {
                metrics::record_api_request(endpoint, "status");
                tracing::warn!(
                    %request_id,
                    endpoint,
                    status = status.as_u16(),
                    elapsed_ms,
                    "Backend returned error status"
                );
            }
            Err(e) => {
                metrics::record_api_request(endpoint, "error");
                tracing::warn!(
                    %request_id,
                    endpoint,
                    error = %e,
                    elapsed_ms,
                    "Backend request failed"
                );
            }
        }

        result
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        let resp = request.send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status { status, body: text });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let api = client("http://localhost:8080/api");
        let url = api.endpoint(&["summoner"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/summoner");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let api = client("http://localhost:8080/api/");
        let url = api.endpoint(&["tiers"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/tiers");
    }

    #[test]
    fn test_identifier_is_single_encoded_segment() {
        let api = client("http://localhost:8080/api");
        let url = api.endpoint(&["matches", "ab/c d?"]).unwrap();
        assert_eq!(url.path(), "/api/matches/ab%2Fc%20d%3F");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_rejects_unusable_base() {
        assert!(matches!(
            ApiClient::with_client(Client::new(), "/api"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::with_client(Client::new(), "mailto:someone@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_new_from_config() {
        let config = ApiConfig {
            request_timeout_secs: Some(3),
            ..ApiConfig::default()
        };
        let api = ApiClient::new(&config).unwrap();
        assert_eq!(api.base_url().as_str(), "http://localhost:8080/api");
    }
}
