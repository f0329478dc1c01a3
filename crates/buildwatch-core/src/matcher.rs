//! Resolve a [`BuildQuery`] to at most one remote build.

use tracing::debug;

use crate::domain::{
    normalize_version, BuildLookup, BuildQuery, BuildSummary, RemoteBuild, Result,
    VersionMatchGroup, WatchError,
};
use crate::source::BuildSource;

/// Query the source for builds matching `query` and pick one.
///
/// Returns `Ok(None)` when nothing matched yet. With `select_latest` disabled,
/// more than one match is an [`WatchError::AmbiguousMatch`]; with it enabled,
/// the last build in source order wins.
pub async fn find_build(
    source: &dyn BuildSource,
    query: &BuildQuery,
) -> Result<Option<RemoteBuild>> {
    let app_version = normalize_version(query.app_version.as_deref());
    // Build numbers go through the same padding as versions ("42" -> "42.0.0").
    let build_number = normalize_version(query.build_number.as_deref());

    let versions = match app_version {
        Some(version) => vec![Some(version)],
        None if query.select_latest => vec![None],
        None => return Err(WatchError::NoVersionToWatch),
    };

    let mut groups = Vec::with_capacity(versions.len());
    for version in versions {
        let lookup = BuildLookup {
            app_id: query.app_id.clone(),
            version: version.clone(),
            build_number: build_number.clone(),
            platform: query.platform,
        };
        let builds = source.list_builds(&lookup).await?;
        debug!(
            app_id = %lookup.app_id,
            version = ?lookup.version.as_ref().map(|v| v.as_str()),
            build_number = ?lookup.build_number.as_ref().map(|v| v.as_str()),
            found = builds.len(),
            "build lookup"
        );
        groups.push(VersionMatchGroup { version, builds });
    }

    select_build(groups, query.select_latest)
}

/// Flatten per-version groups and apply the single-match rule.
pub fn select_build(
    groups: Vec<VersionMatchGroup>,
    select_latest: bool,
) -> Result<Option<RemoteBuild>> {
    let mut builds: Vec<RemoteBuild> = groups.into_iter().flat_map(|g| g.builds).collect();

    if builds.len() > 1 && !select_latest {
        let candidates = builds.iter().map(BuildSummary::from).collect();
        return Err(WatchError::AmbiguousMatch { candidates });
    }

    Ok(builds.pop())
}
