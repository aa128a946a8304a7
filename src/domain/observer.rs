//! Observability hooks invoked by the resolver at its decision points.

use crate::domain::resolution::Outcome;
use crate::error::FetchError;

/// Receives one call per resolver decision.
///
/// Implementations must be cheap and must not fail; they run inline on the
/// request path.
///
/// # Implementations
///
/// - [`crate::infrastructure::observability::TracingObserver`] - `tracing` events plus `metrics` counters
pub trait RedirectObserver: Send + Sync {
    /// The table could not be fetched.
    fn fetch_failed(&self, sheet_name: &str, error: &FetchError);

    /// The table was fetched; `count` entries will be scanned for `path`.
    fn entries_loaded(&self, sheet_name: &str, count: usize, path: &str);

    /// `path` matched an entry and will redirect to `target`.
    fn matched(&self, path: &str, target: &str);

    /// `path` will redirect to the default target.
    fn fell_back(&self, path: &str, default_url: &str, reason: Outcome);
}
