//! GitHub REST API retrieval.
//!
//! Provides:
//! - [`GithubApi`]: the three calls the rest of the crate depends on
//! - [`client::ApiClient`]: the reqwest-backed implementation with retries
//! - [`retry::RetryPolicy`] / [`retry::classify_status`]: the retry rules
//! - [`models`]: decoded payload types

pub mod client;
pub mod error;
pub mod models;
pub mod retry;

use async_trait::async_trait;

pub use client::{ApiClient, GITHUB_JSON, PER_PAGE, USER_AGENT};
pub use error::{ApiError, ApiResult};
pub use models::{CodeFrequency, Repository};
pub use retry::{classify_status, Disposition, RetryPolicy};

/// Injectable data source for repository listings and statistics.
///
/// [`ApiClient`] talks to GitHub; tests plug in in-memory doubles.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Public repositories owned by `username` (first page of 100).
    async fn list_public_repositories(&self, username: &str) -> ApiResult<Vec<Repository>>;

    /// Repositories visible to the token holder, private ones included.
    async fn list_repositories_for_authenticated_user(&self) -> ApiResult<Vec<Repository>>;

    /// Weekly additions/deletions for `full_name`, newest week first.
    async fn weekly_commit_activity(&self, full_name: &str) -> ApiResult<Vec<CodeFrequency>>;
}
