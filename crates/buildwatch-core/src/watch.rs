//! The poll loop.
//!
//! `WatchController` repeatedly matches the configured build, reports its
//! status and either returns it, fails on the deadline, or sleeps and polls
//! again:
//!
//! ```text
//! Searching --ready/appeared--> Done
//! Searching --no match / still processing--> (sleep) Searching
//! Searching --timeout / match error / source error--> Failed
//! ```

use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::clock::{Clock, SystemClock};
use crate::config::WatchConfig;
use crate::domain::{RemoteBuild, Result, WatchError, WatchedBuild};
use crate::matcher::find_build;
use crate::obs::{
    emit_build_matched, emit_poll, emit_watch_finished, emit_watch_started, emit_watch_timeout,
    watch_span,
};
use crate::processing::is_processed;
use crate::reporter::{report, StatusSink, TracingSink, BUILD_NOT_LISTED_HINT};
use crate::source::BuildSource;

/// Loop-local state of one `watch` call.
#[derive(Debug, Clone)]
pub struct WatchSession {
    pub started_at: Instant,
    pub timeout: Option<Duration>,
    pub poll_interval: Duration,
    pub shown_hint: bool,
    pub attempts: u64,
}

impl WatchSession {
    pub fn start(config: &WatchConfig, now: Instant) -> Self {
        Self {
            started_at: now,
            timeout: config.timeout,
            poll_interval: config.poll_interval,
            shown_hint: false,
            attempts: 0,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// `Some((elapsed, limit))` once `now` is strictly past the deadline.
    pub fn deadline_exceeded(&self, now: Instant) -> Option<(Duration, Duration)> {
        let limit = self.timeout?;
        let elapsed = self.elapsed(now);
        (elapsed > limit).then_some((elapsed, limit))
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A qualifying build was found; the session is done.
    Done(RemoteBuild),
    /// Nothing qualifying yet. Carries the build seen this poll, if any.
    Waiting(Option<RemoteBuild>),
}

/// Drives a watch session against a build source.
pub struct WatchController<'a> {
    source: &'a dyn BuildSource,
    clock: &'a dyn Clock,
    sink: &'a dyn StatusSink,
}

impl<'a> WatchController<'a> {
    pub fn new(
        source: &'a dyn BuildSource,
        clock: &'a dyn Clock,
        sink: &'a dyn StatusSink,
    ) -> Self {
        Self {
            source,
            clock,
            sink,
        }
    }

    /// Block until the configured build qualifies or the session fails.
    ///
    /// Without a timeout this only returns once a qualifying build shows up
    /// or an error occurs.
    pub async fn watch(&self, config: &WatchConfig) -> Result<WatchedBuild> {
        let span = watch_span(&config.query.app_id);
        self.watch_inner(config).instrument(span).await
    }

    async fn watch_inner(&self, config: &WatchConfig) -> Result<WatchedBuild> {
        let query = &config.query;
        emit_watch_started(
            &query.app_id,
            query.app_version.as_deref(),
            query.build_number.as_deref(),
            config.timeout,
        );

        let mut session = WatchSession::start(config, self.clock.now());
        let result = self.run(config, &mut session).await;

        let elapsed = session.elapsed(self.clock.now());
        emit_watch_finished(session.attempts, elapsed, result.is_ok());

        let build = result?;
        emit_build_matched(
            &build.app_version,
            &build.build_number,
            &build.processing_state.to_string(),
        );
        Ok(if config.return_summary {
            WatchedBuild::Summary(build.summary())
        } else {
            WatchedBuild::Full(build)
        })
    }

    async fn run(&self, config: &WatchConfig, session: &mut WatchSession) -> Result<RemoteBuild> {
        loop {
            if let PollOutcome::Done(build) = self.poll_once(config, session).await? {
                return Ok(build);
            }

            // Checked after the readiness check so a build that is ready right at
            // the deadline still wins.
            if let Some((elapsed, limit)) = session.deadline_exceeded(self.clock.now()) {
                emit_watch_timeout(elapsed, limit);
                return Err(WatchError::TimeoutExceeded { elapsed, limit });
            }

            self.clock.sleep(session.poll_interval).await;
        }
    }

    /// One iteration: match, hint, report, and evaluate termination.
    pub async fn poll_once(
        &self,
        config: &WatchConfig,
        session: &mut WatchSession,
    ) -> Result<PollOutcome> {
        let first_attempt = session.attempts == 0;
        session.attempts += 1;

        let matched = find_build(self.source, &config.query).await?;
        emit_poll(
            session.attempts,
            matched.is_some(),
            session.elapsed(self.clock.now()),
        );

        if first_attempt && matched.is_none() && !session.shown_hint {
            self.sink.hint(BUILD_NOT_LISTED_HINT);
            session.shown_hint = true;
        }

        report(self.sink, matched.as_ref(), config.require_beta_detail);

        match matched {
            Some(build)
                if config.return_when_build_appears
                    || is_processed(Some(&build), config.require_beta_detail) =>
            {
                Ok(PollOutcome::Done(build))
            }
            other => Ok(PollOutcome::Waiting(other)),
        }
    }
}

/// Watch with the system clock, logging progress through `tracing`.
pub async fn watch_build(source: &dyn BuildSource, config: &WatchConfig) -> Result<WatchedBuild> {
    WatchController::new(source, &SystemClock, &TracingSink)
        .watch(config)
        .await
}
