//! Pre-issued access token provider.

use async_trait::async_trait;
use tracing::debug;

use super::provider::{AccessToken, TokenProvider};
use crate::error::FetchResult;

/// Returns the same token for every request.
///
/// Used with `GOOGLE_OAUTH_ACCESS_TOKEN` during development, for example with
/// the output of `gcloud auth print-access-token`. Scopes are whatever the
/// token was issued with.
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        debug!("Using static access token");
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self, _scopes: &[&str]) -> FetchResult<AccessToken> {
        Ok(self.token.clone())
    }
}
