//! Error types for the API client.

/// Fallback text when neither field errors nor a message explain a failure.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Fallback text when a transport error carries no description.
pub const TRANSPORT_FAILURE: &str = "An error occurred";

/// Errors that can occur when making API requests.
///
/// Every variant displays as a single human-readable message. Callers are
/// expected to surface that text rather than branch on the variant.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("{0}")]
    Transport(String),
    /// The API returned a non-success status without a readable envelope.
    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },
    /// The API answered with an envelope describing a failure, either through
    /// a non-success status or `success: false`.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A success status whose body was not a valid envelope.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// The base URL and path did not form a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    /// A multipart part could not be built (e.g. malformed MIME type).
    #[error("Invalid form field '{field}': {reason}")]
    Encoding { field: String, reason: String },
}

impl Error {
    /// The human-readable message carried by this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        let text = err.to_string();
        if text.is_empty() {
            Error::Transport(TRANSPORT_FAILURE.to_string())
        } else {
            Error::Transport(text)
        }
    }
}
