//! `tracing` + `metrics` backed observer.

use metrics::counter;
use tracing::{debug, info, warn};

use crate::domain::observer::RedirectObserver;
use crate::domain::resolution::Outcome;
use crate::error::FetchError;

/// Counter incremented once per resolved request, labeled by `outcome`.
pub const RESOLUTIONS_TOTAL: &str = "redirect_resolutions_total";

/// Counter incremented on each failed fetch, labeled by error `kind`.
pub const FETCH_FAILURES_TOTAL: &str = "redirect_fetch_failures_total";

/// Observer emitting structured log events and counters.
///
/// Counters are recorded through the `metrics` facade; without an installed
/// recorder they are no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl RedirectObserver for TracingObserver {
    fn fetch_failed(&self, sheet_name: &str, error: &FetchError) {
        warn!(sheet = sheet_name, kind = error.kind(), "Failed to fetch entries: {}", error);
        counter!(FETCH_FAILURES_TOTAL, "kind" => error.kind()).increment(1);
    }

    fn entries_loaded(&self, sheet_name: &str, count: usize, path: &str) {
        debug!(sheet = sheet_name, count, path, "Scanning entries");
    }

    fn matched(&self, path: &str, target: &str) {
        info!(path, target_url = target, "Redirecting to {}", target);
        counter!(RESOLUTIONS_TOTAL, "outcome" => Outcome::Matched.as_str()).increment(1);
    }

    fn fell_back(&self, path: &str, default_url: &str, reason: Outcome) {
        info!(
            path,
            reason = reason.as_str(),
            "Redirecting to default URL {}",
            default_url
        );
        counter!(RESOLUTIONS_TOTAL, "outcome" => reason.as_str()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use std::collections::HashMap;

    /// Drains the recorder into `(name, label key, label value) -> count`.
    fn counters(snapshotter: &Snapshotter) -> HashMap<(String, String, String), u64> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| {
                let DebugValue::Counter(count) = value else {
                    return None;
                };
                let key = key.key();
                let label = key.labels().next()?;
                Some((
                    (
                        key.name().to_string(),
                        label.key().to_string(),
                        label.value().to_string(),
                    ),
                    count,
                ))
            })
            .collect()
    }

    fn entry(name: &str, label: &str, value: &str) -> (String, String, String) {
        (name.to_string(), label.to_string(), value.to_string())
    }

    #[test]
    fn test_matched_counts_resolution() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let observer = TracingObserver::new();
            observer.matched("/abc", "http://example.org");
            observer.matched("/xyz", "https://other.org");
        });

        let counters = counters(&snapshotter);
        assert_eq!(counters.len(), 1);
        assert_eq!(counters[&entry(RESOLUTIONS_TOTAL, "outcome", "matched")], 2);
    }

    #[test]
    fn test_fell_back_counts_by_reason() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let observer = TracingObserver::new();
            observer.fell_back("/missing", "https://www.wikipedia.org", Outcome::NoMatch);
            observer.fell_back("/abc", "https://www.wikipedia.org", Outcome::Unavailable);
            observer.fell_back("/other", "https://www.wikipedia.org", Outcome::NoMatch);
        });

        let counters = counters(&snapshotter);
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[&entry(RESOLUTIONS_TOTAL, "outcome", "no_match")], 2);
        assert_eq!(counters[&entry(RESOLUTIONS_TOTAL, "outcome", "unavailable")], 1);
    }

    #[test]
    fn test_fetch_failed_counts_by_kind() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let observer = TracingObserver::new();
            observer.fetch_failed("Sheet1", &FetchError::Token("denied".to_string()));
            observer.fetch_failed(
                "Sheet1",
                &FetchError::Status {
                    status: 403,
                    body: "forbidden".to_string(),
                },
            );
        });

        let counters = counters(&snapshotter);
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[&entry(FETCH_FAILURES_TOTAL, "kind", "token")], 1);
        assert_eq!(counters[&entry(FETCH_FAILURES_TOTAL, "kind", "status")], 1);
    }

    #[test]
    fn test_entries_loaded_records_no_counter() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            TracingObserver::new().entries_loaded("Sheet1", 2, "/abc");
        });

        assert!(counters(&snapshotter).is_empty());
    }
}
