//! Error types for the GitHub retrieval client.

use thiserror::Error;

/// Errors produced by a single logical GitHub API call.
///
/// Each variant names the stage that failed so callers can tell a rejected
/// request apart from a flaky network or a garbled payload.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The request URL could not be built from the configured base URL.
    #[error("failed to build request for {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server answered with a 4xx status. Never retried.
    #[error("client error (4xx): status code is {status}")]
    ClientError { status: u16 },

    /// Every attempt in the retry budget failed.
    #[error("request failed after several retries ({attempts} attempts)")]
    RetriesExhausted { attempts: u32 },

    /// The response body could not be read to the end.
    #[error("failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by a terminal client error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ClientError { status } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience result alias.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_displays_status_code() {
        let err = ApiError::ClientError { status: 404 };
        assert_eq!(err.to_string(), "client error (4xx): status code is 404");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_retries_exhausted_message() {
        let err = ApiError::RetriesExhausted { attempts: 3 };
        assert!(err.to_string().contains("failed after several retries"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_decode_error_converts_from_serde() {
        let parse_err = serde_json::from_str::<Vec<i64>>("[1, 2").unwrap_err();
        let err: ApiError = parse_err.into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
