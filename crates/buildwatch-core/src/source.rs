//! Collaborator seam for querying the distribution platform.
//!
//! The watcher only depends on this trait; transport, authentication and wire
//! format live in the implementation. In-memory fakes are provided for testing
//! via the `fakes` module.

use async_trait::async_trait;

use crate::domain::{BuildLookup, RemoteBuild, SourceError};

/// Read-only query interface over the platform's build list.
///
/// Contract:
/// - Results are ordered ascending by creation time; the matcher treats the
///   last element as the newest and does not re-sort.
/// - Results are fully materialized; any pagination is resolved by the
///   implementation.
/// - Errors are returned as-is and are not retried by the watcher.
#[async_trait]
pub trait BuildSource: Send + Sync {
    async fn list_builds(&self, lookup: &BuildLookup) -> Result<Vec<RemoteBuild>, SourceError>;
}

