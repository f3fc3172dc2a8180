//! Transport error types

use std::fmt;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur before a response status is available
///
/// A transport error means no (complete) response was received. Non-2xx
/// responses are *not* transport errors.
#[derive(Debug)]
pub enum TransportError {
    /// HTTP protocol error, or the body could not be read
    Http(String),

    /// Connection could not be established
    Connection(String),

    /// Request or connect timeout elapsed
    Timeout,

    /// Base URL or request path does not form a valid URL
    InvalidUrl(String),

    /// Request body could not be encoded
    Serialization(String),

    /// Generic transport error
    Other(String),
}

impl TransportError {
    /// Whether the failure happened before any byte reached the server.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::InvalidUrl(_))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Timeout => write!(f, "Timeout"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TransportError::Timeout.to_string(), "Timeout");
        assert_eq!(
            TransportError::Connection("refused".into()).to_string(),
            "Connection error: refused"
        );
        assert_eq!(TransportError::Other("boom".into()).to_string(), "boom");
    }

    #[test]
    fn test_is_connect() {
        assert!(TransportError::Connection("x".into()).is_connect());
        assert!(TransportError::InvalidUrl("x".into()).is_connect());
        assert!(!TransportError::Timeout.is_connect());
        assert!(!TransportError::Http("x".into()).is_connect());
    }

    #[test]
    fn test_from_url_error() {
        let err: TransportError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }
}
