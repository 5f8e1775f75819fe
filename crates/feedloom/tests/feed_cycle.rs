//! End-to-end load and submit cycles against an in-memory node.

use std::time::Duration;

use feedloom::client::{Endpoint, Fault};
use feedloom::{
    Aggregator, FailureKind, FeedConfig, FeedError, HtmlFileSurface, LoadPhase, MemorySurface,
    Shown, TimestampUnit,
};
use feedloom_testkit::{multi_party_fixtures, preloaded_backend, snapshot, two_log_scenario};
use serde_json::json;

#[tokio::test]
async fn scenario_renders_oldest_first_with_self_marker() {
    let (identity, logs) = two_log_scenario();
    let backend = preloaded_backend(&identity, &logs, 1_000).await;
    let aggregator = Aggregator::new(backend, MemorySurface::new(), FeedConfig::default());

    let report = aggregator.load().await.unwrap();
    assert_eq!(report.phases.last(), Some(&LoadPhase::Done));

    let view = aggregator.surface().feed().unwrap();
    let rows: Vec<_> = view
        .records
        .iter()
        .map(|r| (r.short_key.as_str(), r.body.as_str(), r.is_self))
        .collect();
    assert_eq!(rows, vec![("ccc333ddd", "yo", false), ("aaa111bbb", "hi", true)]);
    assert_eq!(view.records[0].avatar.fill.to_css(), "#ccc333");
    assert_eq!(view.records[0].avatar.band.to_css(), "#ddd444");
}

#[tokio::test]
async fn many_authors_interleave_by_timestamp() {
    let parties = multi_party_fixtures(3);
    let logs = snapshot(&[
        (&parties[0], vec![(10, "a1"), (40, "a2")]),
        (&parties[1], vec![(20, "b1"), (40, "b2")]),
        (&parties[2], vec![(30, "c1")]),
    ]);
    let viewer = parties[1].identity();
    let backend = preloaded_backend(&viewer, &logs, 100).await;
    let aggregator = Aggregator::new(backend, MemorySurface::new(), FeedConfig::default());

    let report = aggregator.load().await.unwrap();
    let bodies: Vec<_> = report.view.records.iter().map(|r| r.body.as_str()).collect();
    assert_eq!(bodies.len(), 5);
    assert_eq!(&bodies[..3], &["a1", "b1", "c1"]);
    // The two entries at 40 may come in either log order, but both come last.
    assert!(bodies[3..].contains(&"a2") && bodies[3..].contains(&"b2"));
    assert_eq!(report.view.self_authored(), 2);
}

#[tokio::test]
async fn post_then_reload_shows_new_entry_last() {
    let (identity, logs) = two_log_scenario();
    let backend = preloaded_backend(&identity, &logs, 1_000).await;
    let aggregator = Aggregator::new(backend, MemorySurface::new(), FeedConfig::default());

    aggregator.load().await.unwrap();
    aggregator.submit_post("<b>bold</b> & more").await.unwrap();

    let view = aggregator.surface().feed().unwrap();
    let last = view.records.last().unwrap();
    assert_eq!(last.body, "<b>bold</b> & more");
    assert!(last.is_self);
    assert_eq!(aggregator.backend().calls(Endpoint::ListPosts).await, 2);
}

#[tokio::test]
async fn recovers_after_node_comes_back() {
    let (identity, logs) = two_log_scenario();
    let backend = preloaded_backend(&identity, &logs, 1_000).await;
    backend.set_fault(Endpoint::ListPosts, Fault::Status(503)).await;
    let aggregator = Aggregator::new(backend, MemorySurface::new(), FeedConfig::default());

    let err = aggregator.load().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network);
    assert!(matches!(aggregator.surface().shown(), Shown::Error(_)));

    aggregator.backend().clear_faults().await;
    aggregator.load().await.unwrap();
    assert_eq!(aggregator.surface().feed().unwrap().records.len(), 2);
}

#[tokio::test]
async fn malformed_identity_is_fatal() {
    let (identity, logs) = two_log_scenario();
    let backend = preloaded_backend(&identity, &logs, 1_000).await;
    backend.set_identity_raw(json!({ "public_key": "abc" })).await;
    let aggregator = Aggregator::new(backend, MemorySurface::new(), FeedConfig::default());

    let err = aggregator.load().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidKeyFormat);
    assert!(aggregator.surface().feed().is_none());
}

#[tokio::test]
async fn stalled_identity_times_out() {
    let (identity, logs) = two_log_scenario();
    let backend = preloaded_backend(&identity, &logs, 1_000).await;
    backend.set_fault(Endpoint::Whoami, Fault::Stall).await;
    let config = FeedConfig::default().with_load_timeout(Duration::from_millis(50));
    let aggregator = Aggregator::new(backend, MemorySurface::new(), config);

    let err = aggregator.load().await.unwrap_err();
    assert!(matches!(err, FeedError::Timeout(_)));
}

#[tokio::test]
async fn html_page_written_and_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");

    let (identity, logs) = two_log_scenario();
    let backend = preloaded_backend(&identity, &logs, 1_700_000_000_000).await;
    let config = FeedConfig::default().with_timestamp_unit(TimestampUnit::Millis);
    let aggregator = Aggregator::new(backend, HtmlFileSurface::new(&path), config);

    aggregator.load().await.unwrap();
    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.find(">yo</div>").unwrap() < page.find(">hi</div>").unwrap());
    assert!(page.contains("aaa111bbb222"));

    aggregator.submit_post("<script>x</script>").await.unwrap();
    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(page.contains("2023-11-14 22:13:20 UTC"));
    assert_eq!(page.matches("class=\"post\"").count(), 3);
}
