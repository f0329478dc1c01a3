//! Error types for buildwatch-client

use buildwatch_core::SourceError;
use thiserror::Error;

/// Errors that can occur while talking to the build catalog
#[derive(Error, Debug)]
pub enum ClientError {
    /// Base URL missing or unparseable
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success HTTP status
    #[error("Catalog returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pagination did not terminate
    #[error("Catalog pagination exceeded {0} pages")]
    TooManyPages(usize),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err.to_string())
    }
}

impl From<ClientError> for SourceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidUrl(msg) => SourceError::Config(msg),
            ClientError::Http(msg) => SourceError::Transport(msg),
            ClientError::Status { code, body } => SourceError::Status { code, body },
            ClientError::Json(e) => SourceError::Decode(e.to_string()),
            err @ ClientError::TooManyPages(_) => SourceError::Decode(err.to_string()),
        }
    }
}
