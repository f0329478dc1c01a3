//! Structured observability hooks for the watch lifecycle.
//!
//! This module provides:
//! - A session-scoped tracing span via `watch_span`
//! - Emission functions for key lifecycle events: start, poll, match, finish, timeout
//!
//! Events are emitted at `info!` level unless noted (configurable via `RUST_LOG`).

use std::time::Duration;

use tracing::{debug, info, warn};

/// Span tagging every event of one watch session with its app id.
///
/// The poll loop is async, so the span is attached with
/// `tracing::Instrument` rather than entered.
pub fn watch_span(app_id: &str) -> tracing::Span {
    tracing::info_span!("buildwatch.session", app_id = %app_id)
}

/// Emit event: watch session started.
pub fn emit_watch_started(
    app_id: &str,
    app_version: Option<&str>,
    build_number: Option<&str>,
    timeout: Option<Duration>,
) {
    info!(
        event = "watch.started",
        app_id = %app_id,
        app_version = app_version.unwrap_or("*"),
        build_number = build_number.unwrap_or("*"),
        timeout_secs = timeout.map(|t| t.as_secs()),
    );
}

/// Emit event: one poll finished (debug level).
pub fn emit_poll(attempt: u64, matched: bool, elapsed: Duration) {
    debug!(
        event = "watch.poll",
        attempt = attempt,
        matched = matched,
        elapsed_ms = elapsed.as_millis() as u64,
    );
}

/// Emit event: a build was selected and the session is returning it.
pub fn emit_build_matched(app_version: &str, build_number: &str, processing_state: &str) {
    info!(
        event = "watch.build_matched",
        app_version = %app_version,
        build_number = %build_number,
        processing_state = %processing_state,
    );
}

/// Emit event: watch session finished with attempt count and duration.
pub fn emit_watch_finished(attempts: u64, elapsed: Duration, success: bool) {
    info!(
        event = "watch.finished",
        attempts = attempts,
        elapsed_ms = elapsed.as_millis() as u64,
        success = success,
    );
}

/// Emit event: the deadline passed (warning level).
pub fn emit_watch_timeout(elapsed: Duration, limit: Duration) {
    warn!(
        event = "watch.timeout",
        elapsed_secs = elapsed.as_secs(),
        limit_secs = limit.as_secs(),
    );
}

/// Emit event: a deprecated option was used (warning level).
pub fn emit_deprecated_option(name: &str, replacement: &str) {
    warn!(
        event = "config.deprecated_option",
        option = %name,
        replacement = %replacement,
        "{name} is deprecated, use {replacement}"
    );
}
