//! Counters recorded by the API client and search history.

use lolgg_client::api::ApiClient;
use lolgg_client::history::{MemoryStorage, SearchHistory};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

mod common;

/// Value of the counter `name` carrying every label in `labels`.
fn counter(snapshotter: &Snapshotter, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .find_map(|(key, _, _, value)| {
            let (_, key) = key.into_parts();
            let labelled = labels
                .iter()
                .all(|(k, v)| key.labels().any(|l| l.key() == *k && l.value() == *v));
            match value {
                DebugValue::Counter(n) if key.name() == name && labelled => Some(n),
                _ => None,
            }
        })
}

#[test]
fn test_discarded_save_is_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let mut history = SearchHistory::new(MemoryStorage::with_quota(0));
        assert!(history.save("Faker", "KR1").error().is_some());
    });

    let discarded = [("op", "save"), ("outcome", "discarded")];
    assert_eq!(counter(&snapshotter, "lolgg_history_events_total", &discarded), Some(1));
    assert_eq!(
        counter(&snapshotter, "lolgg_history_events_total", &[("op", "load")]),
        Some(1)
    );
}

#[test]
fn test_error_status_is_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    // A current-thread runtime keeps every poll on this thread, where the
    // local recorder is visible.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let backend = common::start_mock_backend(500, r#"{"message":"boom"}"#).await;
            let http = reqwest::Client::builder().no_proxy().build().unwrap();
            let api = ApiClient::with_client(http, &backend.base_url()).unwrap();

            assert!(api.get_matches("puuid-1").await.is_err());
            assert!(api.get_matches("puuid-1").await.is_err());
        })
    });

    let status = [("endpoint", "matches"), ("outcome", "status")];
    assert_eq!(counter(&snapshotter, "lolgg_api_requests_total", &status), Some(2));
    assert_eq!(
        counter(&snapshotter, "lolgg_api_requests_total", &[("outcome", "success")]),
        None
    );
}
