//! Terminal-state evaluation for a matched build.

use crate::domain::RemoteBuild;

/// Whether `build` finished remote processing.
///
/// With `require_beta_detail`, the nested beta detail must also be ready; a
/// missing beta detail counts as not ready.
pub fn is_processed(build: Option<&RemoteBuild>, require_beta_detail: bool) -> bool {
    let Some(build) = build else {
        return false;
    };

    let base = build.processing_state.is_ready();
    if !require_beta_detail {
        return base;
    }

    base && build
        .beta_detail
        .as_ref()
        .is_some_and(|detail| detail.processing_state.is_ready())
}
