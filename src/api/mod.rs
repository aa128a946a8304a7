//! HTTP layer translating requests into redirect resolutions.
//!
//! # Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware

pub mod handlers;
pub mod middleware;
