//! Error types for outbound requests and startup configuration.
//!
//! Panels never propagate a [`FetchError`]; they keep its display string in
//! their fetch state and render it inline as `Error: <message>`.

use thiserror::Error;

/// Failure of a single outbound GET through the fetch primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider answered with a non-success HTTP status.
    #[error("HTTP error! Status: {status}")]
    RequestFailed { status: u16 },

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("{0}")]
    Transport(String),

    /// The provider answered 2xx but the body was not the expected JSON.
    #[error("{0}")]
    Decode(String),
}

/// The request URL carries credentials in its query, and the message ends up
/// in the rendered page, so it is dropped from the error first.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::RequestFailed {
                status: status.as_u16(),
            };
        }
        let decode = err.is_decode();
        let message = err.without_url().to_string();
        if decode {
            FetchError::Decode(message)
        } else {
            FetchError::Transport(message)
        }
    }
}

/// Invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} endpoint {value:?}: {source}")]
    InvalidEndpoint {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("wikipedia endpoint {0:?} must contain a {{lang}} placeholder")]
    MissingLangPlaceholder(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message() {
        let err = FetchError::RequestFailed { status: 404 };
        assert_eq!(err.to_string(), "HTTP error! Status: 404");
    }

    #[test]
    fn test_transport_message_is_passed_through() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_missing_placeholder_message() {
        let err = ConfigError::MissingLangPlaceholder("https://wiki.example".to_string());
        assert_eq!(
            err.to_string(),
            "wikipedia endpoint \"https://wiki.example\" must contain a {lang} placeholder"
        );
    }
}
