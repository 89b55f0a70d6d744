//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding session, configuration, and input validation failures.
#[derive(Debug)]
pub enum SocialFeedError {
    /// An error from the underlying API client. Displays as the backend's
    /// human-readable message.
    Api(socialfeed_api::Error),
    /// An operation needing a bearer token ran without one.
    NotAuthenticated,
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Required configuration is missing or malformed.
    Config(String),
    /// Reading an attachment from disk failed.
    Io(std::io::Error),
}

impl fmt::Display for SocialFeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::NotAuthenticated => write!(f, "Not authenticated. Please log in."),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SocialFeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<socialfeed_api::Error> for SocialFeedError {
    fn from(e: socialfeed_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for SocialFeedError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
