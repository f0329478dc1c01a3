//! buildwatch core library
//!
//! Blocks until a freshly uploaded build finishes remote processing on the
//! distribution platform:
//!
//! - `domain`: build descriptors, queries, version normalization and errors
//! - `matcher`: resolve a query to at most one remote build
//! - `processing`: decide whether a build reached its terminal ready state
//! - `reporter`: progress messages for each poll
//! - `watch`: the timeout-bounded poll loop

pub mod clock;
pub mod config;
pub mod domain;
pub mod fakes;
pub mod matcher;
pub mod obs;
pub mod processing;
pub mod reporter;
pub mod source;
pub mod telemetry;
pub mod watch;

pub use clock::{Clock, SystemClock};
pub use config::{DeprecatedOption, LegacyWatchOptions, WatchConfig, DEFAULT_POLL_INTERVAL};
pub use domain::{
    normalize_version, BetaDetail, BuildLookup, BuildQuery, BuildSummary, NormalizedVersion,
    ParsePlatformError, Platform, ProcessingState, RemoteBuild, Result, SourceError,
    VersionMatchGroup, WatchError, WatchErrorKind, WatchedBuild,
};
pub use matcher::{find_build, select_build};
pub use processing::is_processed;
pub use reporter::{report, StatusReport, StatusSink, TracingSink, BUILD_NOT_LISTED_HINT};
pub use source::BuildSource;
pub use telemetry::init_tracing;
pub use watch::{watch_build, PollOutcome, WatchController, WatchSession};

/// buildwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
