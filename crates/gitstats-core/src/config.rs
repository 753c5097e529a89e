//! Runtime configuration for the GitHub client.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Environment variable holding the personal access token.
pub const TOKEN_ENV: &str = "GGS_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "GGS_API_BASE_URL";

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

// https://github.blog/2021-04-05-behind-githubs-new-authentication-token-formats/
const TOKEN_PATTERN: &str = r"^ghp_[a-zA-Z0-9]{36}$";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("token in {var} has an invalid format (expected ghp_ followed by 36 alphanumerics)")]
    InvalidToken { var: &'static str },
}

/// Convenience result alias.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Base URL plus an optional token. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_API_BASE_URL)
    }
}

impl Config {
    /// Config for a specific base URL, without a token.
    pub fn new(api_base_url: &str) -> Self {
        Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Set the token. An empty string leaves the config unauthenticated.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Load from `GGS_TOKEN` and `GGS_API_BASE_URL`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(API_BASE_URL_ENV).ok(),
        )
    }

    pub(crate) fn from_vars(token: Option<String>, base_url: Option<String>) -> ConfigResult<Self> {
        let token = token.unwrap_or_default();
        if !is_valid_token(&token) {
            return Err(ConfigError::InvalidToken { var: TOKEN_ENV });
        }

        let base_url = base_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Config::new(&base_url).with_token(&token))
    }

    /// The token, if one is set and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

/// Whether `token` looks like a classic personal access token.
///
/// An empty token means "not configured" and is accepted.
pub fn is_valid_token(token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE
        .get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
        .is_match(token)
}
