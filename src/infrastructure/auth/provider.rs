//! Token provider trait and access token type.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use crate::error::{FetchError, FetchResult};

/// Scopes requested for reading the redirect table.
pub const SHEETS_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/devstorage.read_only",
];

/// An OAuth2 bearer token.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Source of bearer tokens for Google APIs.
///
/// A token is requested for every fetch; implementations do not cache.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtains an access token carrying `scopes`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FetchError::Token`] when the credential
    /// provider rejects the request, or a transport error.
    async fn access_token(&self, scopes: &[&str]) -> FetchResult<AccessToken>;
}

/// Token endpoint response body, shared by the OAuth2 and metadata flows.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reads an access token from a token endpoint response.
///
/// Non-success statuses become [`FetchError::Token`] carrying the response body.
pub(super) async fn read_token_response(response: reqwest::Response) -> FetchResult<AccessToken> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Token(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Token(format!("invalid token response: {}", e)))?;

    Ok(AccessToken::new(body.access_token))
}
