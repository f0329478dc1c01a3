//! Build descriptors as returned by the distribution platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParsePlatformError;
use super::version::NormalizedVersion;

/// Target platform of an uploaded build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "IOS")]
    Ios,
    #[serde(rename = "MAC_OS")]
    MacOs,
    #[serde(rename = "TV_OS")]
    TvOs,
    #[serde(rename = "VISION_OS")]
    VisionOs,
}

impl Platform {
    /// Wire name used by the platform API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "IOS",
            Platform::MacOs => "MAC_OS",
            Platform::TvOs => "TV_OS",
            Platform::VisionOs => "VISION_OS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    /// Accepts wire names case-insensitively, plus the common short spellings
    /// (`macos`, `osx`, `tvos`, `appletvos`, `visionos`, `xros`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "mac_os" | "macos" | "osx" => Ok(Platform::MacOs),
            "tv_os" | "tvos" | "appletvos" => Ok(Platform::TvOs),
            "vision_os" | "visionos" | "xros" => Ok(Platform::VisionOs),
            _ => Err(ParsePlatformError {
                input: s.to_string(),
            }),
        }
    }
}

/// Processing status assigned by the platform to an uploaded build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingState {
    #[serde(rename = "PROCESSING", alias = "PENDING")]
    Pending,
    #[serde(rename = "VALID", alias = "READY")]
    Ready,
    Failed,
    Invalid,
    /// Any state this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl ProcessingState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProcessingState::Ready)
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessingState::Pending => "PROCESSING",
            ProcessingState::Ready => "VALID",
            ProcessingState::Failed => "FAILED",
            ProcessingState::Invalid => "INVALID",
            ProcessingState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Secondary readiness status tracked for beta distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetaDetail {
    pub processing_state: ProcessingState,
}

/// A build as reported by the distribution platform. Read-only to the watcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBuild {
    /// Platform-assigned identifier, when the source exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub app_version: String,
    pub build_number: String,
    pub platform: Platform,
    pub processing_state: ProcessingState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_detail: Option<BetaDetail>,
}

impl RemoteBuild {
    pub fn new(
        app_version: impl Into<String>,
        build_number: impl Into<String>,
        platform: Platform,
        processing_state: ProcessingState,
    ) -> Self {
        Self {
            id: None,
            app_version: app_version.into(),
            build_number: build_number.into(),
            platform,
            processing_state,
            uploaded_date: None,
            beta_detail: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_beta_detail(mut self, processing_state: ProcessingState) -> Self {
        self.beta_detail = Some(BetaDetail { processing_state });
        self
    }

    pub fn summary(&self) -> BuildSummary {
        BuildSummary::from(self)
    }
}

/// Lightweight view of a build handed back to callers that do not need the
/// full descriptor. Also used to list conflicting candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub app_version: String,
    pub build_number: String,
    pub platform: Platform,
    pub processing_state: ProcessingState,
}

impl From<&RemoteBuild> for BuildSummary {
    fn from(build: &RemoteBuild) -> Self {
        Self {
            id: build.id.clone(),
            app_version: build.app_version.clone(),
            build_number: build.build_number.clone(),
            platform: build.platform,
            processing_state: build.processing_state,
        }
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} on {} ({})",
            self.app_version, self.build_number, self.platform, self.processing_state
        )
    }
}

/// Result of a successful watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WatchedBuild {
    Full(RemoteBuild),
    Summary(BuildSummary),
}

impl WatchedBuild {
    pub fn app_version(&self) -> &str {
        match self {
            WatchedBuild::Full(b) => &b.app_version,
            WatchedBuild::Summary(s) => &s.app_version,
        }
    }

    pub fn build_number(&self) -> &str {
        match self {
            WatchedBuild::Full(b) => &b.build_number,
            WatchedBuild::Summary(s) => &s.build_number,
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            WatchedBuild::Full(b) => b.platform,
            WatchedBuild::Summary(s) => s.platform,
        }
    }

    pub fn into_full(self) -> Option<RemoteBuild> {
        match self {
            WatchedBuild::Full(b) => Some(b),
            WatchedBuild::Summary(_) => None,
        }
    }
}

/// What to watch for. Fixed for the lifetime of one watch session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildQuery {
    pub app_id: String,
    pub platform: Option<Platform>,
    /// Marketing version; `None` means "no version constraint".
    pub app_version: Option<String>,
    pub build_number: Option<String>,
    /// Pick the newest candidate instead of failing on multiple matches.
    pub select_latest: bool,
}

impl BuildQuery {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Default::default()
        }
    }
}

/// Filter handed to a [`crate::BuildSource`] for a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLookup {
    pub app_id: String,
    pub version: Option<NormalizedVersion>,
    pub build_number: Option<NormalizedVersion>,
    pub platform: Option<Platform>,
}

/// Builds returned for one version of the lookup list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatchGroup {
    pub version: Option<NormalizedVersion>,
    pub builds: Vec<RemoteBuild>,
}
