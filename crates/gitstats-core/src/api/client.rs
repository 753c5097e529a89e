//! HTTP client for the GitHub REST API.
//!
//! [`ApiClient`] owns one `reqwest::Client` and a [`RetryPolicy`]. All three
//! endpoints go through [`ApiClient::fetch`], which drives the retry loop
//! from the [`Disposition`] of each attempt.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{CodeFrequency, Repository};
use crate::api::retry::{classify_status, Disposition, RetryPolicy};
use crate::api::GithubApi;
use crate::config::Config;

/// Media type requested from every endpoint.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// User agent sent with every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("ggs/", env!("CARGO_PKG_VERSION"));

/// Single-page size for repository listings.
pub const PER_PAGE: u32 = 100;

/// GitHub client with a bounded retry policy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    policy: RetryPolicy,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client with the default retry policy.
    pub fn new(config: Config) -> ApiResult<Self> {
        Self::with_policy(config, RetryPolicy::default())
    }

    /// Create a client with a custom retry policy.
    pub fn with_policy(config: Config, policy: RetryPolicy) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::HttpClient)?;

        Ok(ApiClient {
            config,
            policy,
            http,
        })
    }

    /// Build `{base}{path}`.
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let url = format!("{}{}", self.config.api_base_url, path);
        Url::parse(&url).map_err(|source| ApiError::InvalidUrl { url, source })
    }

    fn request(&self, url: &Url, authorize: bool) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url.clone()).header(ACCEPT, GITHUB_JSON);
        if authorize {
            if let Some(token) = self.config.token() {
                request = request.header(AUTHORIZATION, format!("token {token}"));
            }
        }
        request
    }

    /// GET `url` under the retry policy and decode the body as `T`.
    ///
    /// Every response body is read to the end before the next attempt or
    /// the returned error, so the connection can go back to the pool. A
    /// failure while draining a body that is being discarded is ignored.
    async fn fetch<T: DeserializeOwned>(&self, url: &Url, authorize: bool) -> ApiResult<T> {
        let mut remaining = self.policy.max_retries;
        let mut attempts = 0u32;
        let mut polls = 0u32;

        while remaining > 0 {
            attempts += 1;
            let response = match self.request(url, authorize).send().await {
                Ok(response) => response,
                Err(err) => {
                    debug!(url = %url, attempt = attempts, error = %err, "request failed");
                    remaining -= 1;
                    continue;
                }
            };

            let status = response.status();
            debug!(url = %url, attempt = attempts, status = status.as_u16(), "response received");

            match classify_status(status) {
                Disposition::Success => {
                    let body = response.bytes().await.map_err(ApiError::ReadBody)?;
                    return Ok(serde_json::from_slice(&body)?);
                }
                Disposition::Terminal => {
                    discard(response).await;
                    return Err(ApiError::ClientError {
                        status: status.as_u16(),
                    });
                }
                Disposition::RetryAfterDelay => {
                    discard(response).await;
                    if !self.policy.may_poll_again(polls) {
                        break;
                    }
                    polls += 1;
                    info!(
                        url = %url,
                        delay_ms = self.policy.computing_delay.as_millis() as u64,
                        "statistics are being computed, waiting"
                    );
                    tokio::time::sleep(self.policy.computing_delay).await;
                }
                Disposition::RetryNow => {
                    discard(response).await;
                    remaining -= 1;
                }
            }
        }

        Err(ApiError::RetriesExhausted { attempts })
    }
}

async fn discard(response: reqwest::Response) {
    if let Err(err) = response.bytes().await {
        debug!(error = %err, "discarded response body was incomplete");
    }
}

#[async_trait]
impl GithubApi for ApiClient {
    /// <https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user>
    async fn list_public_repositories(&self, username: &str) -> ApiResult<Vec<Repository>> {
        let url = self.endpoint(&format!("/users/{username}/repos?per_page={PER_PAGE}"))?;
        self.fetch(&url, false).await
    }

    /// <https://docs.github.com/en/rest/repos/repos#list-repositories-for-the-authenticated-user>
    async fn list_repositories_for_authenticated_user(&self) -> ApiResult<Vec<Repository>> {
        let url = self.endpoint(&format!("/user/repos?per_page={PER_PAGE}"))?;
        self.fetch(&url, true).await
    }

    /// <https://docs.github.com/en/rest/metrics/statistics#get-the-weekly-commit-activity>
    async fn weekly_commit_activity(&self, full_name: &str) -> ApiResult<Vec<CodeFrequency>> {
        let url = self.endpoint(&format!("/repos/{full_name}/stats/code_frequency"))?;
        let raw: Vec<Vec<i64>> = self.fetch(&url, true).await?;
        Ok(CodeFrequency::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Config::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let url = client("https://api.github.com")
            .endpoint("/users/octocat/repos?per_page=100")
            .unwrap();
        assert_eq!(url.path(), "/users/octocat/repos");
        assert_eq!(url.query(), Some("per_page=100"));
    }

    #[test]
    fn test_endpoint_rejects_malformed_host() {
        let err = client("https://test.ser ver.com")
            .endpoint("/user/repos")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("ggs/"));
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails_before_any_request() {
        let api = client("not a url");
        let err = api.weekly_commit_activity("octocat/hello").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }
}
