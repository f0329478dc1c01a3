//! In-memory fakes for the watcher's collaborators (testing only)
//!
//! Provides `ScriptedBuildSource`, `FakeClock` and `RecordingSink` that satisfy
//! the trait contracts without network access or real time.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::clock::Clock;
use crate::domain::{BuildLookup, RemoteBuild, SourceError};
use crate::reporter::{StatusReport, StatusSink};
use crate::source::BuildSource;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// ScriptedBuildSource
// ---------------------------------------------------------------------------

/// Build source that replays a fixed script of responses, one per call.
///
/// Once the script is exhausted the last successful response is repeated
/// (an empty list if there was none). Every lookup is recorded.
#[derive(Debug, Default)]
pub struct ScriptedBuildSource {
    script: Mutex<VecDeque<Result<Vec<RemoteBuild>, SourceError>>>,
    last: Mutex<Vec<RemoteBuild>>,
    lookups: Mutex<Vec<BuildLookup>>,
}

impl ScriptedBuildSource {
    pub fn new(responses: Vec<Vec<RemoteBuild>>) -> Self {
        Self::from_results(responses.into_iter().map(Ok).collect())
    }

    pub fn from_results(results: Vec<Result<Vec<RemoteBuild>, SourceError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            ..Default::default()
        }
    }

    /// Number of `list_builds` calls made so far.
    pub fn calls(&self) -> usize {
        lock(&self.lookups).len()
    }

    pub fn lookups(&self) -> Vec<BuildLookup> {
        lock(&self.lookups).clone()
    }
}

#[async_trait]
impl BuildSource for ScriptedBuildSource {
    async fn list_builds(&self, lookup: &BuildLookup) -> Result<Vec<RemoteBuild>, SourceError> {
        lock(&self.lookups).push(lookup.clone());
        let next = lock(&self.script).pop_front();
        match next {
            Some(Ok(builds)) => {
                *lock(&self.last) = builds.clone();
                Ok(builds)
            }
            Some(Err(err)) => Err(err),
            None => Ok(lock(&self.last).clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// FakeClock
// ---------------------------------------------------------------------------

/// Fake clock with controllable time. `sleep` returns immediately, advances
/// the clock by the requested duration and records it.
///
/// Clones share state, so a test can keep a handle while the watcher owns
/// another.
#[derive(Debug, Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *lock(&self.current) += duration;
    }

    /// Durations passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        lock(&self.sleeps).clone()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *lock(&self.current)
    }

    async fn sleep(&self, duration: Duration) {
        lock(&self.sleeps).push(duration);
        self.advance(duration);
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Status sink that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    statuses: Mutex<Vec<StatusReport>>,
    hints: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<StatusReport> {
        lock(&self.statuses).clone()
    }

    pub fn hints(&self) -> Vec<String> {
        lock(&self.hints).clone()
    }
}

impl StatusSink for RecordingSink {
    fn status(&self, report: &StatusReport) {
        lock(&self.statuses).push(report.clone());
    }

    fn hint(&self, message: &str) {
        lock(&self.hints).push(message.to_string());
    }
}
