//! # Sheet Redirect
//!
//! A short-link redirect service: every request path is looked up in a
//! two-column Google Sheets table (source path, target) and answered with a
//! `302` redirect to the matched target, or to a configured default.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect entry, repository trait, observer hooks
//! - **Application Layer** ([`application`]) - Path resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Sheets API, Google credentials, observability
//! - **API Layer** ([`api`]) - Redirect handler and middleware
//!
//! ## Behavior
//!
//! - The table is fetched fresh on every request; nothing is cached
//! - Paths are percent-decoded and stripped of the query string, then matched exactly
//! - Targets without an `http` prefix get `http://` prepended
//! - Every failure degrades to a redirect to the default URL; no 4xx/5xx is ever returned
//!
//! ## Quick Start
//!
//! ```bash
//! export DOC_ID="1AbC...xyz"
//! export SHEET_NAME="Links"
//! export GOOGLE_APPLICATION_CREDENTIALS="/path/to/key.json"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::FetchError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::RedirectService;
    pub use crate::domain::entities::RedirectEntry;
    pub use crate::domain::observer::RedirectObserver;
    pub use crate::domain::repositories::EntryRepository;
    pub use crate::domain::resolution::{Outcome, Resolution};
    pub use crate::error::{FetchError, FetchResult};
    pub use crate::state::AppState;
}
