//! Total lines of code changed across an account's repositories.
//!
//! [`LinesAggregator`] resolves the repository set for the configured
//! identity, then fires one `weekly_commit_activity` call per repository
//! concurrently and sums every weekly sample into a shared total.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::{ApiResult, CodeFrequency, GithubApi, Repository};
use crate::config::Config;

/// Sum of `additions + deletions` over a repository's weekly samples.
pub fn sum_lines(samples: &[CodeFrequency]) -> i64 {
    samples.iter().map(CodeFrequency::lines_changed).sum()
}

/// Fans out statistics calls and accumulates the grand total.
pub struct LinesAggregator {
    api: Arc<dyn GithubApi>,
    authenticated: bool,
}

impl LinesAggregator {
    /// `config` only decides which listing is used; `api` does the calls.
    pub fn new(api: Arc<dyn GithubApi>, config: &Config) -> Self {
        Self {
            api,
            authenticated: config.has_token(),
        }
    }

    /// Repositories to aggregate over.
    ///
    /// A configured token wins over `username`. With neither, the set is
    /// empty; deciding whether that is a usage error is up to the caller.
    pub async fn resolve_repositories(&self, username: Option<&str>) -> ApiResult<Vec<Repository>> {
        if self.authenticated {
            return self.api.list_repositories_for_authenticated_user().await;
        }
        match username.filter(|name| !name.is_empty()) {
            Some(name) => self.api.list_public_repositories(name).await,
            None => Ok(Vec::new()),
        }
    }

    /// Resolve the repository set, then total the lines changed across it.
    ///
    /// Failing to list repositories is an error. A repository whose
    /// statistics cannot be fetched contributes nothing.
    pub async fn compute_total_lines(&self, username: Option<&str>) -> ApiResult<i64> {
        let repositories = self.resolve_repositories(username).await?;
        Ok(self.total_lines(&repositories).await)
    }

    /// Total lines changed across `repositories`.
    ///
    /// Returns only after every spawned worker has finished.
    pub async fn total_lines(&self, repositories: &[Repository]) -> i64 {
        let total = Arc::new(Mutex::new(0i64));
        let mut join_set = JoinSet::new();

        for repository in repositories {
            let api = Arc::clone(&self.api);
            let total = Arc::clone(&total);
            let full_name = repository.full_name.clone();
            join_set.spawn(async move {
                let samples = match api.weekly_commit_activity(&full_name).await {
                    Ok(samples) => samples,
                    Err(err) => {
                        warn!(repo = %full_name, error = %err, "skipping repository statistics");
                        return;
                    }
                };
                let partial = sum_lines(&samples);
                debug!(
                    repo = %full_name,
                    weeks = samples.len(),
                    lines = partial,
                    "repository totalled"
                );
                *total.lock().await += partial;
            });
        }

        while let Some(joined) = join_set.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "statistics worker did not complete");
            }
        }

        let total = *total.lock().await;
        info!(repositories = repositories.len(), total, "lines aggregated");
        total
    }
}
