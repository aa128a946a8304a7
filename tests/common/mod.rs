#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use sheet_redirect::application::services::RedirectService;
use sheet_redirect::domain::entities::RedirectEntry;
use sheet_redirect::domain::repositories::EntryRepository;
use sheet_redirect::error::{FetchError, FetchResult};
use sheet_redirect::infrastructure::observability::TracingObserver;
use sheet_redirect::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const WIKIPEDIA: &str = "https://www.wikipedia.org";

/// Repository serving a fixed table and counting fetches.
pub struct StaticEntryRepository {
    entries: Vec<RedirectEntry>,
    fetches: AtomicUsize,
}

impl StaticEntryRepository {
    pub fn new(entries: Vec<RedirectEntry>) -> Self {
        Self {
            entries,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntryRepository for StaticEntryRepository {
    async fn fetch_entries(&self, _sheet_name: &str) -> FetchResult<Vec<RedirectEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }
}

/// Repository that always fails like a rejected token request.
pub struct FailingEntryRepository;

#[async_trait]
impl EntryRepository for FailingEntryRepository {
    async fn fetch_entries(&self, _sheet_name: &str) -> FetchResult<Vec<RedirectEntry>> {
        Err(FetchError::Token("invalid_grant".to_string()))
    }
}

/// The two-row table used throughout the redirect tests.
pub fn scenario_entries() -> Vec<RedirectEntry> {
    vec![
        RedirectEntry::new("/abc", "example.org"),
        RedirectEntry::new("/xyz", "https://other.org"),
    ]
}

pub fn create_test_state(repository: Arc<dyn EntryRepository>, default_url: &str) -> AppState {
    let service = RedirectService::new(
        repository,
        Arc::new(TracingObserver::new()),
        "Sheet1".to_string(),
        default_url.to_string(),
    );

    AppState::new(Arc::new(service))
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}
