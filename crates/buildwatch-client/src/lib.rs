//! buildwatch-client: HTTP build catalog for buildwatch
//!
//! Implements the `BuildSource` collaborator over a JSON catalog API so the
//! watcher can poll a real distribution service.

pub mod catalog;
pub mod error;

pub use catalog::{BuildCatalogClient, BuildPage, ClientConfig, API_TOKEN_ENV, API_URL_ENV};
pub use error::ClientError;

/// Result type for catalog client operations
pub type Result<T> = std::result::Result<T, ClientError>;
