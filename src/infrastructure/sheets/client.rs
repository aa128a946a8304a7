//! Sheets API client implementing [`EntryRepository`].

use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::sync::Arc;
use tracing::debug;

use super::values::ValueRange;
use crate::domain::entities::RedirectEntry;
use crate::domain::repositories::EntryRepository;
use crate::error::{FetchError, FetchResult};
use crate::infrastructure::auth::{SHEETS_SCOPES, TokenProvider};

/// Production Sheets API endpoint.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

const SHEETS_VERSION: &str = "v4";

/// Columns holding source paths and targets.
const ENTRY_COLUMNS: &str = "A:B";

/// Characters escaped in a URL path segment. `!` and `:` stay literal so the
/// range reads as `Sheet1!A:B` in logs and on the wire.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Reads redirect entries from columns `A:B` of a spreadsheet.
///
/// Each call obtains a fresh access token and issues one
/// `GET /v4/spreadsheets/{docId}/values/{sheet}!A:B?majorDimension=COLUMNS`.
pub struct SheetsEntryRepository {
    client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    api_base: String,
    doc_id: String,
}

impl SheetsEntryRepository {
    /// Creates a repository for the document `doc_id`.
    ///
    /// `client` should carry the request timeout; it is shared with the
    /// token provider.
    pub fn new(
        client: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
        api_base: impl Into<String>,
        doc_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tokens,
            api_base: api_base.into(),
            doc_id: doc_id.into(),
        }
    }

    /// Builds the `values.get` URL for the entry columns of `sheet_name`.
    pub fn values_url(&self, sheet_name: &str) -> String {
        let range = format!("{}!{}", sheet_name, ENTRY_COLUMNS);

        format!(
            "{}/{}/spreadsheets/{}/values/{}",
            self.api_base.trim_end_matches('/'),
            SHEETS_VERSION,
            utf8_percent_encode(&self.doc_id, PATH_SEGMENT),
            utf8_percent_encode(&range, PATH_SEGMENT),
        )
    }

    /// Fetches the raw `ValueRange` for `sheet_name`.
    ///
    /// # Errors
    ///
    /// See [`EntryRepository::fetch_entries`].
    pub async fn fetch_range(&self, sheet_name: &str) -> FetchResult<ValueRange> {
        let token = self.tokens.access_token(SHEETS_SCOPES).await?;
        let url = self.values_url(sheet_name);

        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.secret())
            .query(&[("majorDimension", "COLUMNS")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ValueRange>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EntryRepository for SheetsEntryRepository {
    async fn fetch_entries(&self, sheet_name: &str) -> FetchResult<Vec<RedirectEntry>> {
        let range = self.fetch_range(sheet_name).await?;

        if range.is_empty() {
            debug!("No values returned for {}", sheet_name);
            return Ok(Vec::new());
        }

        Ok(range.into_entries())
    }
}
