//! Domain models for build watching.
//!
//! - `RemoteBuild`: a build as reported by the distribution platform
//! - `BuildQuery`: what a watch session is looking for
//! - `NormalizedVersion`: canonical dotted version used for lookups
//! - `WatchError`: the failures a session can end with

pub mod build;
pub mod error;
pub mod version;

pub use build::{
    BetaDetail, BuildLookup, BuildQuery, BuildSummary, Platform, ProcessingState, RemoteBuild,
    VersionMatchGroup, WatchedBuild,
};
pub use error::{ParsePlatformError, Result, SourceError, WatchError, WatchErrorKind};
pub use version::{normalize_version, NormalizedVersion};
