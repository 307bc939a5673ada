//! Maps client error types.

use crate::locator::LocatorError;

/// Errors from the maps HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service returned a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Service answered but reported a non-OK status in the payload
    #[error("{endpoint} returned status {status}{}", detail(.message))]
    Status {
        endpoint: &'static str,
        status: String,
        message: Option<String>,
    },

    /// API key rejected
    #[error("request denied: check GOOGLE_MAPS_API_KEY")]
    Unauthorized,

    /// Query quota exhausted
    #[error("rate limited by maps API")]
    RateLimited,

    /// Client could not be configured
    #[error("invalid client configuration: {0}")]
    Config(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

/// Every maps failure is an external-service failure to the locator.
impl From<MapsError> for LocatorError {
    fn from(err: MapsError) -> Self {
        LocatorError::Oracle(err.to_string())
    }
}
