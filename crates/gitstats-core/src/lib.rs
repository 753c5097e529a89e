//! git-stats core library
//!
//! Retrieves repository listings and weekly code frequency from the GitHub
//! REST API and totals the lines changed across an account.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gitstats_core::{ApiClient, Config, LinesAggregator};
//!
//! let config = Config::from_env()?;
//! let api = Arc::new(ApiClient::new(config.clone())?);
//! let total = LinesAggregator::new(api, &config)
//!     .compute_total_lines(Some("octocat"))
//!     .await?;
//! ```

pub mod api;
pub mod config;
pub mod lines;
pub mod telemetry;

pub use api::{
    ApiClient, ApiError, ApiResult, CodeFrequency, Disposition, GithubApi, Repository,
    RetryPolicy,
};
pub use config::{Config, ConfigError, ConfigResult};
pub use lines::{sum_lines, LinesAggregator};
pub use telemetry::init_tracing;
