//! Compute metadata server token provider.

use async_trait::async_trait;
use tracing::debug;

use super::provider::{AccessToken, TokenProvider, read_token_response};
use crate::error::FetchResult;

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Requests tokens for the runtime's default service account.
pub struct MetadataTokenProvider {
    host: String,
    client: reqwest::Client,
}

impl MetadataTokenProvider {
    /// Metadata server address on GCE, Cloud Run and Cloud Functions.
    pub const DEFAULT_HOST: &str = "http://metadata.google.internal";

    pub fn new(host: String, client: reqwest::Client) -> Self {
        debug!("Using metadata server at {}", host);
        Self { host, client }
    }

    fn token_url(&self) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), TOKEN_PATH)
    }
}

#[async_trait]
impl TokenProvider for MetadataTokenProvider {
    async fn access_token(&self, scopes: &[&str]) -> FetchResult<AccessToken> {
        let response = self
            .client
            .get(self.token_url())
            .header("Metadata-Flavor", "Google")
            .query(&[("scopes", scopes.join(","))])
            .send()
            .await?;

        read_token_response(response).await
    }
}
