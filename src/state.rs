//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::RedirectService;

/// State shared by all requests. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    pub fn new(redirect_service: Arc<RedirectService>) -> Self {
        Self { redirect_service }
    }
}
