//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`auth`] - Google access token providers
//! - [`sheets`] - Sheets API entry repository
//! - [`observability`] - Resolver observer backed by `tracing` and `metrics`

pub mod auth;
pub mod observability;
pub mod sheets;
