//! Redirect entry entity representing one row of the remote table.

/// A short-link mapping read from the remote table.
///
/// Entries have no identity beyond the `source_path` string and live only for
/// the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectEntry {
    pub source_path: String,
    pub target: String,
}

impl RedirectEntry {
    /// Creates a new RedirectEntry instance.
    pub fn new(source_path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            target: target.into(),
        }
    }

    /// Returns true if this entry's source path equals `path` exactly.
    ///
    /// Comparison is case-sensitive and performs no trimming.
    pub fn matches(&self, path: &str) -> bool {
        self.source_path == path
    }
}
