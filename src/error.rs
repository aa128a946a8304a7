//! Error types shared by the fetcher and credential providers.
//!
//! None of these errors ever reach an HTTP client: the resolver reports them
//! through the observer and redirects to the default target instead.

/// Errors that can occur while fetching the redirect table.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Credentials could not be located, read or parsed.
    #[error("Failed to load credentials: {0}")]
    Credentials(String),

    /// The credential provider refused to issue an access token.
    #[error("Failed to obtain access token: {0}")]
    Token(String),

    /// Connection, TLS or timeout failure on an outbound request.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The Sheets API answered with a non-success status.
    #[error("Sheets API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a valid `ValueRange`.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short machine-readable label, used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Credentials(_) => "credentials",
            Self::Token(_) => "token",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
