//! Error taxonomy for build watching.

use std::time::Duration;

use super::build::BuildSummary;

/// Errors surfaced by a [`crate::BuildSource`] implementation.
///
/// The watcher never retries or swallows these; they reach the caller on the
/// iteration that produced them.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("source misconfigured: {0}")]
    Config(String),
}

/// Failures that end a watch session.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("no app version to watch: pass an app version or enable select-latest")]
    NoVersionToWatch,

    #[error(
        "found {} builds matching the query; pass a build number or enable select-latest:{}",
        .candidates.len(),
        format_candidates(.candidates)
    )]
    AmbiguousMatch { candidates: Vec<BuildSummary> },

    #[error(
        "timed out after {}s waiting for build (limit {}s)",
        .elapsed.as_secs(),
        .limit.as_secs()
    )]
    TimeoutExceeded { elapsed: Duration, limit: Duration },

    #[error("build source error: {0}")]
    Source(#[from] SourceError),
}

/// Payload-free discriminant of [`WatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchErrorKind {
    NoVersionToWatch,
    AmbiguousMatch,
    TimeoutExceeded,
    Source,
}

impl WatchError {
    pub fn kind(&self) -> WatchErrorKind {
        match self {
            WatchError::NoVersionToWatch => WatchErrorKind::NoVersionToWatch,
            WatchError::AmbiguousMatch { .. } => WatchErrorKind::AmbiguousMatch,
            WatchError::TimeoutExceeded { .. } => WatchErrorKind::TimeoutExceeded,
            WatchError::Source(_) => WatchErrorKind::Source,
        }
    }
}

fn format_candidates(candidates: &[BuildSummary]) -> String {
    candidates
        .iter()
        .map(|c| format!("\n  - {c}"))
        .collect::<String>()
}

/// Returned when a platform name is not recognised.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown platform: {input} (expected one of IOS, MAC_OS, TV_OS, VISION_OS)")]
pub struct ParsePlatformError {
    pub input: String,
}

/// Result type for watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;
