use buildwatch_core::fakes::ScriptedBuildSource;
use buildwatch_core::{
    find_build, BuildQuery, BuildSummary, NormalizedVersion, Platform, ProcessingState,
    RemoteBuild, SourceError, WatchError, WatchErrorKind,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build(version: &str, number: &str, state: ProcessingState) -> RemoteBuild {
    RemoteBuild::new(version, number, Platform::Ios, state)
}

fn query() -> BuildQuery {
    BuildQuery {
        app_id: "1234567890".to_string(),
        platform: Some(Platform::Ios),
        app_version: Some("1.2".to_string()),
        build_number: Some("42".to_string()),
        select_latest: false,
    }
}

// ---------------------------------------------------------------------------
// find_build
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_version_without_select_latest_fails_before_querying() {
    let source = ScriptedBuildSource::new(vec![]);
    let q = BuildQuery {
        app_version: None,
        ..query()
    };

    let err = find_build(&source, &q).await.unwrap_err();

    assert!(matches!(err, WatchError::NoVersionToWatch));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn two_matches_without_select_latest_is_ambiguous() {
    let first = build("1.2.0", "42", ProcessingState::Pending);
    let second = build("1.2.0", "42", ProcessingState::Ready).with_id("dup");
    let source = ScriptedBuildSource::new(vec![vec![first.clone(), second.clone()]]);

    let err = find_build(&source, &query()).await.unwrap_err();

    assert_eq!(err.kind(), WatchErrorKind::AmbiguousMatch);
    match err {
        WatchError::AmbiguousMatch { candidates } => {
            assert_eq!(
                candidates,
                vec![BuildSummary::from(&first), BuildSummary::from(&second)]
            );
        }
        other => panic!("expected AmbiguousMatch, got {other}"),
    }
}

#[tokio::test]
async fn select_latest_returns_last_of_three() {
    let builds = vec![
        build("1.2.0", "40", ProcessingState::Ready),
        build("1.2.0", "41", ProcessingState::Failed),
        build("1.2.0", "42", ProcessingState::Pending),
    ];
    let source = ScriptedBuildSource::new(vec![builds.clone(), builds]);
    let q = BuildQuery {
        select_latest: true,
        build_number: None,
        ..query()
    };

    let first = find_build(&source, &q).await.unwrap().unwrap();
    let again = find_build(&source, &q).await.unwrap().unwrap();

    assert_eq!(first.build_number, "42");
    assert_eq!(first, again);
}

#[tokio::test]
async fn select_latest_without_version_queries_wildcard() {
    let source = ScriptedBuildSource::new(vec![vec![build("3.0.0", "1", ProcessingState::Ready)]]);
    let q = BuildQuery {
        app_version: None,
        build_number: None,
        select_latest: true,
        ..query()
    };

    let found = find_build(&source, &q).await.unwrap();

    assert!(found.is_some());
    let lookups = source.lookups();
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].version, None);
    assert_eq!(lookups[0].build_number, None);
}

#[tokio::test]
async fn lookup_carries_normalized_version_and_build_number() {
    let source = ScriptedBuildSource::new(vec![vec![]]);

    let found = find_build(&source, &query()).await.unwrap();

    assert_eq!(found, None);
    let lookup = &source.lookups()[0];
    assert_eq!(lookup.app_id, "1234567890");
    assert_eq!(lookup.version, Some(NormalizedVersion::parse("1.2.0")));
    assert_eq!(lookup.build_number.as_ref().map(|b| b.as_str()), Some("42.0.0"));
    assert_eq!(lookup.platform, Some(Platform::Ios));
}

#[tokio::test]
async fn single_match_is_returned() {
    let only = build("1.2.0", "42", ProcessingState::Pending);
    let source = ScriptedBuildSource::new(vec![vec![only.clone()]]);

    assert_eq!(find_build(&source, &query()).await.unwrap(), Some(only));
}

#[tokio::test]
async fn source_errors_propagate_unmodified() {
    let source = ScriptedBuildSource::from_results(vec![Err(SourceError::Status {
        code: 401,
        body: "unauthorized".to_string(),
    })]);

    let err = find_build(&source, &query()).await.unwrap_err();

    match err {
        WatchError::Source(SourceError::Status { code, body }) => {
            assert_eq!(code, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected source error, got {other}"),
    }
}
