//! Repository trait for redirect table access.

use crate::domain::entities::RedirectEntry;
use crate::error::FetchResult;
use async_trait::async_trait;

/// Read-only source of redirect entries.
///
/// Every call fetches the table afresh; implementations must not cache
/// entries between calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::sheets::SheetsEntryRepository`] - Google Sheets implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Fetches all entries of the named sheet in table order.
    ///
    /// # Returns
    ///
    /// - `Ok(entries)` - possibly empty when the sheet has no usable rows
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FetchError`] on authentication, transport or
    /// decoding failures.
    async fn fetch_entries(&self, sheet_name: &str) -> FetchResult<Vec<RedirectEntry>>;
}
