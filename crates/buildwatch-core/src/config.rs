//! Watch session configuration.
//!
//! All watch options collapse into [`WatchConfig`]. Deprecated option names
//! are accepted through [`LegacyWatchOptions`] and translated once at the
//! boundary by [`WatchConfig::apply_legacy`].

use std::fmt;
use std::time::Duration;

use crate::domain::{BuildQuery, Platform};
use crate::obs::emit_deprecated_option;

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Options for one watch session.
///
/// Defaults: poll every 10 seconds, no timeout, wait for full processing,
/// do not require beta detail processing, return the full build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub query: BuildQuery,
    pub poll_interval: Duration,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Return as soon as a matching build is listed, processed or not.
    pub return_when_build_appears: bool,
    /// Also wait for the build's beta detail to finish processing.
    pub require_beta_detail: bool,
    /// Return a [`crate::BuildSummary`] instead of the full build.
    pub return_summary: bool,
}

impl WatchConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            query: BuildQuery::new(app_id),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            return_when_build_appears: false,
            require_beta_detail: false,
            return_summary: false,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.query.platform = Some(platform);
        self
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.query.app_version = Some(app_version.into());
        self
    }

    pub fn with_build_number(mut self, build_number: impl Into<String>) -> Self {
        self.query.build_number = Some(build_number.into());
        self
    }

    pub fn with_select_latest(mut self, select_latest: bool) -> Self {
        self.query.select_latest = select_latest;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_return_when_build_appears(mut self, enabled: bool) -> Self {
        self.return_when_build_appears = enabled;
        self
    }

    pub fn with_require_beta_detail(mut self, enabled: bool) -> Self {
        self.require_beta_detail = enabled;
        self
    }

    pub fn with_return_summary(mut self, enabled: bool) -> Self {
        self.return_summary = enabled;
        self
    }

    /// Fold deprecated options into this config.
    ///
    /// `train_version` fills `app_version` only when no app version was given.
    /// `strict_build_watch` can only turn `require_beta_detail` on; an explicit
    /// `true` is never cleared. Each deprecated option
    /// that was supplied logs one warning and is listed in the return value.
    pub fn apply_legacy(&mut self, legacy: LegacyWatchOptions) -> Vec<DeprecatedOption> {
        let mut used = Vec::new();

        if let Some(train_version) = legacy.train_version {
            used.push(DeprecatedOption::TrainVersion);
            if self.query.app_version.is_none() {
                self.query.app_version = Some(train_version);
            }
        }

        if let Some(strict) = legacy.strict_build_watch {
            used.push(DeprecatedOption::StrictBuildWatch);
            self.require_beta_detail |= strict;
        }

        for option in &used {
            emit_deprecated_option(option.name(), option.replacement());
        }
        used
    }
}

/// Deprecated option names still accepted for backward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyWatchOptions {
    /// Old name for the app version.
    pub train_version: Option<String>,
    /// Old name for requiring beta detail processing.
    pub strict_build_watch: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeprecatedOption {
    TrainVersion,
    StrictBuildWatch,
}

impl DeprecatedOption {
    pub fn name(&self) -> &'static str {
        match self {
            DeprecatedOption::TrainVersion => "train_version",
            DeprecatedOption::StrictBuildWatch => "strict_build_watch",
        }
    }

    pub fn replacement(&self) -> &'static str {
        match self {
            DeprecatedOption::TrainVersion => "app_version",
            DeprecatedOption::StrictBuildWatch => "require_beta_detail",
        }
    }
}

impl fmt::Display for DeprecatedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is deprecated, use {}", self.name(), self.replacement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WatchConfig::new("app");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.timeout, None);
        assert!(!config.return_when_build_appears);
        assert!(!config.require_beta_detail);
        assert!(!config.return_summary);
        assert!(!config.query.select_latest);
        assert_eq!(config.query.app_version, None);
    }

    #[test]
    fn train_version_fills_missing_app_version() {
        let mut config = WatchConfig::new("app");
        let used = config.apply_legacy(LegacyWatchOptions {
            train_version: Some("2.1".to_string()),
            strict_build_watch: None,
        });
        assert_eq!(used, vec![DeprecatedOption::TrainVersion]);
        assert_eq!(config.query.app_version.as_deref(), Some("2.1"));
    }

    #[test]
    fn explicit_app_version_wins_over_train_version() {
        let mut config = WatchConfig::new("app").with_app_version("3.0");
        config.apply_legacy(LegacyWatchOptions {
            train_version: Some("2.1".to_string()),
            strict_build_watch: None,
        });
        assert_eq!(config.query.app_version.as_deref(), Some("3.0"));
    }

    #[test]
    fn strict_build_watch_maps_to_beta_detail() {
        let mut config = WatchConfig::new("app");
        let used = config.apply_legacy(LegacyWatchOptions {
            train_version: None,
            strict_build_watch: Some(true),
        });
        assert_eq!(used, vec![DeprecatedOption::StrictBuildWatch]);
        assert!(config.require_beta_detail);
    }

    #[test]
    fn strict_build_watch_false_keeps_explicit_beta_detail() {
        let mut config = WatchConfig::new("app").with_require_beta_detail(true);
        let used = config.apply_legacy(LegacyWatchOptions {
            train_version: None,
            strict_build_watch: Some(false),
        });
        assert_eq!(used, vec![DeprecatedOption::StrictBuildWatch]);
        assert!(config.require_beta_detail);
    }

    #[test]
    fn no_legacy_options_no_notices() {
        let mut config = WatchConfig::new("app");
        let before = config.clone();
        assert!(config.apply_legacy(LegacyWatchOptions::default()).is_empty());
        assert_eq!(config, before);
    }

    #[test]
    fn deprecation_message_names_replacement() {
        assert_eq!(
            DeprecatedOption::TrainVersion.to_string(),
            "train_version is deprecated, use app_version"
        );
    }
}
