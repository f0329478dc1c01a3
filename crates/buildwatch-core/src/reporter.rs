//! Human-readable progress for a watch session.
//!
//! Each poll produces exactly one [`StatusReport`], delivered to a
//! [`StatusSink`]. Reporting has no influence on the poll loop.

use std::fmt;

use tracing::{info, warn};

use crate::domain::{Platform, RemoteBuild};
use crate::processing::is_processed;

/// Shown once per session when the first poll finds nothing.
pub const BUILD_NOT_LISTED_HINT: &str = "build not listed yet; freshly uploaded builds can take \
several minutes to appear. Check the app version, build number and platform if it never shows up";

/// Progress of the watched build as of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    AwaitingBuild,
    Processing {
        app_version: String,
        build_number: String,
        platform: Platform,
    },
    Complete {
        app_version: String,
        build_number: String,
        platform: Platform,
    },
}

impl StatusReport {
    pub fn evaluate(build: Option<&RemoteBuild>, require_beta_detail: bool) -> Self {
        let Some(b) = build else {
            return StatusReport::AwaitingBuild;
        };
        let app_version = b.app_version.clone();
        let build_number = b.build_number.clone();
        let platform = b.platform;
        if is_processed(build, require_beta_detail) {
            StatusReport::Complete {
                app_version,
                build_number,
                platform,
            }
        } else {
            StatusReport::Processing {
                app_version,
                build_number,
                platform,
            }
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusReport::AwaitingBuild => f.write_str("waiting for build to appear"),
            StatusReport::Processing {
                app_version,
                build_number,
                platform,
            } => write!(
                f,
                "waiting for processing of {app_version}-{build_number} on {platform}"
            ),
            StatusReport::Complete {
                app_version,
                build_number,
                platform,
            } => write!(
                f,
                "processing complete for {app_version}-{build_number} on {platform}"
            ),
        }
    }
}

/// Receiver of progress messages.
pub trait StatusSink: Send + Sync {
    fn status(&self, report: &StatusReport);

    /// Informational hint, shown at most once per session.
    fn hint(&self, message: &str);
}

/// Sink that writes progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn status(&self, report: &StatusReport) {
        info!(event = "watch.status", "{report}");
    }

    fn hint(&self, message: &str) {
        warn!(event = "watch.hint", "{message}");
    }
}

/// Evaluate `build` and emit exactly one status message.
pub fn report(sink: &dyn StatusSink, build: Option<&RemoteBuild>, require_beta_detail: bool) {
    sink.status(&StatusReport::evaluate(build, require_beta_detail));
}
