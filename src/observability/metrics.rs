//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lolgg_api_requests_total` (counter): backend calls by endpoint, outcome
//! - `lolgg_history_events_total` (counter): history operations by op, outcome
//! - `lolgg_history_entries` (gauge): current history length
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; it is a no-op until a
//!   recorder is installed
//! - `init_metrics` installs the Prometheus exporter with its own scrape listener
//! - Embedding applications may install any other recorder instead

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the global Prometheus recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_api_request(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!("lolgg_api_requests_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
}

pub fn record_history_event(op: &'static str, outcome: &'static str) {
    metrics::counter!("lolgg_history_events_total", "op" => op, "outcome" => outcome)
        .increment(1);
}

pub fn record_history_size(len: usize) {
    metrics::gauge!("lolgg_history_entries").set(len as f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    #[test]
    fn test_records_through_installed_recorder() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_api_request("tiers", "success");
            record_api_request("tiers", "success");
            record_history_size(3);
        });

        let mut counter = None;
        let mut gauge = None;
        for (key, _, _, value) in snapshotter.snapshot().into_vec() {
            let (_, key) = key.into_parts();
            match (key.name(), value) {
                ("lolgg_api_requests_total", DebugValue::Counter(n)) => {
                    let labels: Vec<_> = key.labels().map(|l| (l.key(), l.value())).collect();
                    assert_eq!(labels, [("endpoint", "tiers"), ("outcome", "success")]);
                    counter = Some(n);
                }
                ("lolgg_history_entries", DebugValue::Gauge(v)) => gauge = Some(v.into_inner()),
                _ => {}
            }
        }

        assert_eq!(counter, Some(2));
        assert_eq!(gauge, Some(3.0));
    }
}
