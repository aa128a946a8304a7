//! Service account (JWT bearer grant) token provider.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::provider::{AccessToken, TokenProvider, read_token_response};
use crate::error::{FetchError, FetchResult};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime of the signed assertion, the maximum Google accepts.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service account JSON key file used for token exchange.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parses a key from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Credentials`] if the JSON is malformed or
    /// required fields are missing.
    pub fn from_json(json: &str) -> FetchResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FetchError::Credentials(format!("invalid service account key: {}", e)))
    }

    /// Reads a key file, typically the one named by `GOOGLE_APPLICATION_CREDENTIALS`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Credentials`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> FetchResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            FetchError::Credentials(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

/// JWT claims of the OAuth2 assertion.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Exchanges an RS256-signed assertion for an access token at `token_uri`.
pub struct ServiceAccountTokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
}

impl ServiceAccountTokenProvider {
    /// Creates a provider, parsing the private key up front.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Credentials`] if `private_key` is not a valid RSA PEM.
    pub fn new(key: ServiceAccountKey, client: reqwest::Client) -> FetchResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| FetchError::Credentials(format!("invalid private key: {}", e)))?;

        debug!("Using service account {}", key.client_email);

        Ok(Self {
            key,
            encoding_key,
            client,
        })
    }

    /// Builds and signs the assertion for `scopes`, issued at `iat`.
    fn sign_assertion(&self, scopes: &[&str], iat: i64) -> FetchResult<String> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: scopes.join(" "),
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| FetchError::Token(format!("failed to sign assertion: {}", e)))
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self, scopes: &[&str]) -> FetchResult<AccessToken> {
        let assertion = self.sign_assertion(scopes, Utc::now().timestamp())?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        read_token_response(response).await
    }
}
