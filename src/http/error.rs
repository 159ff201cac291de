//! Classification of unsuccessful HTTP responses.

use reqwest::{Response, StatusCode};

/// A response that came back with a non-success status.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchError {
    /// Rate limit exceeded (HTTP 403 with an exhausted quota, or 429)
    RateLimitExceeded(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Resource not found (HTTP 404)
    NotFound(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Any other 4xx
    ClientError(String),
    /// 5xx and anything else that is not a success
    ServerError(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::RateLimitExceeded(msg) => {
                write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN environment variable.",
                    msg
                )
            }
            FetchError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            FetchError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FetchError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            FetchError::ClientError(msg) => write!(f, "Request error: {}", msg),
            FetchError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Maps a non-success status onto a [`FetchError`].
///
/// `quota_exhausted` tells a rate-limited 403 apart from a plain one.
pub fn classify_status(status: StatusCode, quota_exhausted: bool) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED => {
            FetchError::AuthenticationFailed("Invalid or missing authentication token".to_string())
        }
        StatusCode::FORBIDDEN if quota_exhausted => {
            FetchError::RateLimitExceeded("GitHub API rate limit exceeded".to_string())
        }
        StatusCode::FORBIDDEN => {
            FetchError::Forbidden("Access to this resource is forbidden".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            FetchError::RateLimitExceeded("Too many requests".to_string())
        }
        StatusCode::NOT_FOUND => {
            FetchError::NotFound("The requested resource was not found".to_string())
        }
        s if s.is_client_error() => FetchError::ClientError(format!("HTTP {} error", s.as_u16())),
        s => FetchError::ServerError(format!("HTTP {} error", s.as_u16())),
    }
}

/// Passes successful responses through and converts everything else.
pub fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let quota_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    Err(classify_status(status, quota_exhausted))
}
