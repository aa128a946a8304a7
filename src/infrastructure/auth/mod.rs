//! Access token providers for Google APIs.
//!
//! Provides a [`TokenProvider`] trait with three implementations:
//! - [`ServiceAccountTokenProvider`] - Signed JWT exchanged at the OAuth2 token endpoint
//! - [`MetadataTokenProvider`] - GCE / Cloud Run metadata server
//! - [`StaticTokenProvider`] - Pre-issued token, for development
//!
//! [`from_source`] picks one from a [`crate::config::CredentialSource`].

mod metadata;
mod provider;
mod service_account;
mod static_token;

pub use metadata::MetadataTokenProvider;
pub use provider::{AccessToken, SHEETS_SCOPES, TokenProvider};
pub use service_account::{ServiceAccountKey, ServiceAccountTokenProvider};
pub use static_token::StaticTokenProvider;

use std::sync::Arc;

use crate::config::CredentialSource;
use crate::error::FetchResult;

/// Builds the token provider for a credential source.
///
/// # Errors
///
/// Returns [`crate::error::FetchError::Credentials`] if a service account key
/// file cannot be read or its private key is invalid.
pub fn from_source(
    source: &CredentialSource,
    client: reqwest::Client,
) -> FetchResult<Arc<dyn TokenProvider>> {
    let provider: Arc<dyn TokenProvider> = match source {
        CredentialSource::AccessToken(token) => Arc::new(StaticTokenProvider::new(token.clone())),
        CredentialSource::ServiceAccountFile(path) => {
            let key = ServiceAccountKey::from_file(path)?;
            Arc::new(ServiceAccountTokenProvider::new(key, client)?)
        }
        CredentialSource::Metadata { host } => {
            Arc::new(MetadataTokenProvider::new(host.clone(), client))
        }
    };

    Ok(provider)
}
