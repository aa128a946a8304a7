//! Application configuration loaded from command-line flags and environment variables.
//!
//! Configuration is loaded once at startup, validated, and passed down
//! explicitly. For every setting a command-line flag wins over the
//! environment, and the first matching environment variable wins.
//!
//! ```bash
//! export DOC_ID="1AbC...xyz"
//! export SHEET_NAME="Links"
//! export DEFAULT_URL="https://example.com"
//! ```
//!
//! ## Required Variables
//!
//! - `--docId` (`--DOC_ID`) / `docId` / `DOC_ID` - Spreadsheet document id
//!
//! ## Optional Variables
//!
//! - `--sheetName` (`--SHEET_NAME`) / `sheetName` / `SHEET_NAME` - Sheet tab name (default: `Sheet1`)
//! - `--default-url` (`--DEFAULT_URL`) / `DEFAULT_URL` - Fallback target (default: `https://www.wikipedia.org`)
//! - `--listen` / `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHEETS_API_BASE` - Sheets API base URL (default: `https://sheets.googleapis.com`)
//! - `SHEETS_TIMEOUT_SECONDS` - Outbound request timeout (default: 10)
//!
//! ## Credentials
//!
//! Checked in order, first match wins:
//!
//! 1. `GOOGLE_OAUTH_ACCESS_TOKEN` - pre-issued bearer token
//! 2. `GOOGLE_APPLICATION_CREDENTIALS` - path to a service account JSON key
//! 3. Metadata server at `GCE_METADATA_HOST` (default: `http://metadata.google.internal`)

use anyhow::Result;
use std::env;
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::infrastructure::auth::MetadataTokenProvider;
use crate::infrastructure::sheets::DEFAULT_API_BASE;

/// Redirect target used when `DEFAULT_URL` is not configured.
pub const DEFAULT_TARGET_URL: &str = "https://www.wikipedia.org";

/// Sheet read when no sheet name is configured.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Environment variables naming the document id, in priority order.
const DOC_ID_VARS: &[&str] = &["docId", "DOC_ID"];

/// Environment variables naming the sheet, in priority order.
const SHEET_NAME_VARS: &[&str] = &["sheetName", "SHEET_NAME"];

/// Settings that may be given on the command line.
///
/// Shared by the server and the admin CLI via `#[command(flatten)]`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Spreadsheet document id
    #[arg(long = "docId", visible_alias = "doc-id", alias = "DOC_ID")]
    pub doc_id: Option<String>,

    /// Sheet tab holding the redirect table
    #[arg(long = "sheetName", visible_alias = "sheet-name", alias = "SHEET_NAME")]
    pub sheet_name: Option<String>,

    /// Fallback redirect target
    #[arg(long = "default-url", alias = "DEFAULT_URL")]
    pub default_url: Option<String>,

    /// Bind address (host:port)
    #[arg(long)]
    pub listen: Option<String>,
}

/// Where access tokens come from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `GOOGLE_OAUTH_ACCESS_TOKEN`
    AccessToken(String),
    /// `GOOGLE_APPLICATION_CREDENTIALS`
    ServiceAccountFile(PathBuf),
    /// Compute metadata server
    Metadata { host: String },
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken(_) => write!(f, "static access token"),
            Self::ServiceAccountFile(path) => write!(f, "service account key {}", path.display()),
            Self::Metadata { host } => write!(f, "metadata server {}", host),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub doc_id: String,
    pub sheet_name: String,
    pub default_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Base URL of the Sheets API; overridden in tests and emulators.
    pub sheets_api_base: String,
    /// Timeout applied to every outbound request, token requests included.
    pub request_timeout_seconds: u64,
    pub credentials: CredentialSource,
}

impl Config {
    /// Builds configuration from command-line overrides and the environment.
    ///
    /// Does not validate; see [`Config::validate`].
    pub fn from_sources(overrides: &ConfigOverrides) -> Self {
        let doc_id = overrides
            .doc_id
            .clone()
            .or_else(|| first_env(DOC_ID_VARS))
            .unwrap_or_default();

        let sheet_name = overrides
            .sheet_name
            .clone()
            .or_else(|| first_env(SHEET_NAME_VARS))
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());

        let default_url = overrides
            .default_url
            .clone()
            .or_else(|| first_env(&["DEFAULT_URL"]))
            .unwrap_or_else(|| DEFAULT_TARGET_URL.to_string());

        let listen_addr = overrides
            .listen
            .clone()
            .or_else(|| first_env(&["LISTEN"]))
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let log_level = first_env(&["RUST_LOG"]).unwrap_or_else(|| "info".to_string());
        let log_format = first_env(&["LOG_FORMAT"]).unwrap_or_else(|| "text".to_string());

        let sheets_api_base =
            first_env(&["SHEETS_API_BASE"]).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let request_timeout_seconds = first_env(&["SHEETS_TIMEOUT_SECONDS"])
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            doc_id,
            sheet_name,
            default_url,
            listen_addr,
            log_level,
            log_format,
            sheets_api_base,
            request_timeout_seconds,
            credentials: Self::load_credentials(),
        }
    }

    /// Picks the credential source.
    ///
    /// Priority:
    /// 1. `GOOGLE_OAUTH_ACCESS_TOKEN`
    /// 2. `GOOGLE_APPLICATION_CREDENTIALS`
    /// 3. Metadata server (`GCE_METADATA_HOST` or the default host)
    fn load_credentials() -> CredentialSource {
        if let Some(token) = first_env(&["GOOGLE_OAUTH_ACCESS_TOKEN"]) {
            return CredentialSource::AccessToken(token);
        }

        if let Some(path) = first_env(&["GOOGLE_APPLICATION_CREDENTIALS"]) {
            return CredentialSource::ServiceAccountFile(PathBuf::from(path));
        }

        let host = first_env(&["GCE_METADATA_HOST"])
            .map(|host| {
                if host.starts_with("http://") || host.starts_with("https://") {
                    host
                } else {
                    format!("http://{}", host)
                }
            })
            .unwrap_or_else(|| MetadataTokenProvider::DEFAULT_HOST.to_string());

        CredentialSource::Metadata { host }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the document id is empty
    /// - the sheet name is empty
    /// - `default_url` is not an absolute `http`/`https` URL
    /// - `listen_addr` is not `host:port`
    /// - `log_format` is not `text` or `json`
    /// - `sheets_api_base` is not a URL
    /// - `request_timeout_seconds` is 0
    pub fn validate(&self) -> Result<()> {
        if self.doc_id.trim().is_empty() {
            anyhow::bail!("DOC_ID must be set (flag --docId, or env docId / DOC_ID)");
        }

        if self.sheet_name.is_empty() {
            anyhow::bail!("SHEET_NAME must not be empty");
        }

        match Url::parse(&self.default_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => anyhow::bail!(
                "DEFAULT_URL must use http or https, got '{}'",
                self.default_url
            ),
            Err(e) => anyhow::bail!("DEFAULT_URL is invalid ({}): '{}'", e, self.default_url),
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if Url::parse(&self.sheets_api_base).is_err() {
            anyhow::bail!(
                "SHEETS_API_BASE must be a URL, got '{}'",
                self.sheets_api_base
            );
        }

        if self.request_timeout_seconds == 0 {
            anyhow::bail!("SHEETS_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without secrets).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Document: {}", self.doc_id);
        tracing::info!("  Sheet: {}", self.sheet_name);
        tracing::info!("  Default URL: {}", self.default_url);
        tracing::info!("  Sheets API: {}", self.sheets_api_base);
        tracing::info!("  Credentials: {:?}", self.credentials);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        for (ignored, used) in shadowed_env_vars() {
            tracing::warn!("  {} is set but ignored, {} takes precedence", ignored, used);
        }
    }
}

/// Returns `(ignored, used)` pairs for settings named by more than one
/// non-empty environment variable.
pub fn shadowed_env_vars() -> Vec<(&'static str, &'static str)> {
    [DOC_ID_VARS, SHEET_NAME_VARS]
        .into_iter()
        .flat_map(|keys| {
            let mut set = keys
                .iter()
                .copied()
                .filter(|key| env::var(key).is_ok_and(|value| !value.is_empty()));
            match set.next() {
                Some(used) => set.map(|ignored| (ignored, used)).collect::<Vec<_>>(),
                None => Vec::new(),
            }
        })
        .collect()
}

/// Returns the first of `keys` set to a non-empty value.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
}

/// Loads and validates configuration.
///
/// # Errors
///
/// Returns an error if required settings are missing or validation fails.
///
/// # Note
///
/// This function expects `.env` files to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load(overrides: &ConfigOverrides) -> Result<Config> {
    let config = Config::from_sources(overrides);
    config.validate()?;
    Ok(config)
}
