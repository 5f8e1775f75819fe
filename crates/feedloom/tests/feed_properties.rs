//! Feed properties over generated snapshots, through the full load cycle.

use proptest::prelude::*;

use feedloom::core::{merge_feed, AuthorKey, Identity, LogCollection};
use feedloom::{Aggregator, FeedConfig, LoadReport, MemorySurface};
use feedloom_testkit::{log_collection, preloaded_backend};

fn load(logs: &LogCollection) -> LoadReport {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let viewer = Identity::new(AuthorKey::parse("aaa111bbb222").unwrap());
        let backend = preloaded_backend(&viewer, logs, 1_000).await;
        let aggregator = Aggregator::new(backend, MemorySurface::new(), FeedConfig::default());
        aggregator.load().await.unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn loaded_feed_keeps_every_operation(logs in log_collection(5, 8)) {
        let report = load(&logs);
        prop_assert_eq!(report.rendered(), logs.total_operations());
        prop_assert!(report.rejected.is_empty());
    }

    #[test]
    fn loaded_feed_is_time_ordered(logs in log_collection(5, 8)) {
        let report = load(&logs);
        let stamps: Vec<u64> = report.view.records.iter().map(|r| r.timestamp.value()).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ties_keep_log_order(logs in log_collection(5, 8)) {
        let report = load(&logs);

        // Log order, then position within the log, for every operation.
        let flattened: Vec<_> = logs
            .iter()
            .flat_map(|(_, ops)| ops.iter())
            .map(|op| (op.timestamp.value(), op.author_key.as_str(), op.body.as_str()))
            .collect();
        for ts in 0u64..8 {
            let expected: Vec<_> = flattened.iter().filter(|e| e.0 == ts).map(|e| (e.1, e.2)).collect();
            let rendered: Vec<_> = report
                .view
                .records
                .iter()
                .filter(|r| r.timestamp.value() == ts)
                .map(|r| (r.author_key.as_str(), r.body.as_str()))
                .collect();
            prop_assert_eq!(expected, rendered);
        }

        let merged: Vec<_> = merge_feed(&logs).into_iter().map(|op| op.body).collect();
        let shown: Vec<_> = report.view.records.iter().map(|r| r.body.clone()).collect();
        prop_assert_eq!(merged, shown);
    }
}
