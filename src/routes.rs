//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `ANY /*` - Short link redirect (router fallback, so `/` and nested
//!   paths resolve too)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
