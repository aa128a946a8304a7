//! Redirect resolution service.

use std::sync::Arc;

use crate::domain::entities::RedirectEntry;
use crate::domain::observer::RedirectObserver;
use crate::domain::repositories::EntryRepository;
use crate::domain::resolution::{Outcome, Resolution};
use crate::error::FetchResult;
use crate::utils::url_normalizer::{normalize_request_path, normalize_target};

/// Service resolving request paths to redirect targets.
///
/// Every call fetches the table afresh from the repository. Failures never
/// escape: they are reported to the observer and resolved to the default
/// target.
pub struct RedirectService {
    repository: Arc<dyn EntryRepository>,
    observer: Arc<dyn RedirectObserver>,
    sheet_name: String,
    default_url: String,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        repository: Arc<dyn EntryRepository>,
        observer: Arc<dyn RedirectObserver>,
        sheet_name: String,
        default_url: String,
    ) -> Self {
        Self {
            repository,
            observer,
            sheet_name,
            default_url,
        }
    }

    /// Returns the configured fallback target.
    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Returns the name of the sheet entries are read from.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Resolves a raw request target (`path?query`) to a redirect target.
    ///
    /// # Resolution
    ///
    /// 1. Normalize the request path (percent-decode, drop query)
    /// 2. Fetch the table; on error or an empty table, fall back
    /// 3. First entry whose source path equals the normalized path wins
    /// 4. Matched targets are scheme-prefixed when they do not start with `http`
    /// 5. Otherwise, fall back to the default target
    pub async fn resolve(&self, raw_target: &str) -> Resolution {
        let path = normalize_request_path(raw_target);

        let entries = match self.repository.fetch_entries(&self.sheet_name).await {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) => {
                return self.fall_back(&path, Outcome::Unavailable);
            }
            Err(e) => {
                self.observer.fetch_failed(&self.sheet_name, &e);
                return self.fall_back(&path, Outcome::Unavailable);
            }
        };

        self.observer
            .entries_loaded(&self.sheet_name, entries.len(), &path);

        match find_entry(&entries, &path) {
            Some(entry) => {
                let target = normalize_target(&entry.target);
                self.observer.matched(&path, &target);
                Resolution::matched(target)
            }
            None => self.fall_back(&path, Outcome::NoMatch),
        }
    }

    /// Fetches the table without resolving anything.
    ///
    /// Used by the admin CLI; errors are returned, not swallowed.
    pub async fn entries(&self) -> FetchResult<Vec<RedirectEntry>> {
        self.repository.fetch_entries(&self.sheet_name).await
    }

    fn fall_back(&self, path: &str, reason: Outcome) -> Resolution {
        self.observer.fell_back(path, &self.default_url, reason);
        Resolution::fallback(&self.default_url, reason)
    }
}

/// Returns the first entry whose source path equals `path`.
pub fn find_entry<'a>(entries: &'a [RedirectEntry], path: &str) -> Option<&'a RedirectEntry> {
    entries.iter().find(|entry| entry.matches(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockEntryRepository;
    use crate::error::FetchError;
    use std::sync::Mutex;

    const DEFAULT_URL: &str = "https://www.wikipedia.org";

    /// Observer recording every call as a short string.
    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl RedirectObserver for RecordingObserver {
        fn fetch_failed(&self, sheet_name: &str, error: &FetchError) {
            self.push(format!("fetch_failed:{}:{}", sheet_name, error.kind()));
        }

        fn entries_loaded(&self, sheet_name: &str, count: usize, _path: &str) {
            self.push(format!("entries_loaded:{}:{}", sheet_name, count));
        }

        fn matched(&self, path: &str, target: &str) {
            self.push(format!("matched:{}:{}", path, target));
        }

        fn fell_back(&self, path: &str, _default_url: &str, reason: Outcome) {
            self.push(format!("fell_back:{}:{}", path, reason.as_str()));
        }
    }

    fn scenario_entries() -> Vec<RedirectEntry> {
        vec![
            RedirectEntry::new("/abc", "example.org"),
            RedirectEntry::new("/xyz", "https://other.org"),
        ]
    }

    fn create_service(
        repo: MockEntryRepository,
        observer: Arc<RecordingObserver>,
    ) -> RedirectService {
        RedirectService::new(
            Arc::new(repo),
            observer,
            "Links".to_string(),
            DEFAULT_URL.to_string(),
        )
    }

    fn repo_returning(entries: Vec<RedirectEntry>) -> MockEntryRepository {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo
            .expect_fetch_entries()
            .returning(move |_| Ok(entries.clone()));
        mock_repo
    }

    #[tokio::test]
    async fn test_resolve_match_without_scheme() {
        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(repo_returning(scenario_entries()), observer.clone());

        let resolution = service.resolve("/abc").await;

        assert_eq!(resolution.target, "http://example.org");
        assert_eq!(resolution.outcome, Outcome::Matched);
        assert_eq!(
            observer.events(),
            vec![
                "entries_loaded:Links:2".to_string(),
                "matched:/abc:http://example.org".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_match_with_scheme() {
        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(repo_returning(scenario_entries()), observer);

        let resolution = service.resolve("/xyz").await;

        assert_eq!(resolution.target, "https://other.org");
        assert!(resolution.is_match());
    }

    #[tokio::test]
    async fn test_resolve_missing_falls_back() {
        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(repo_returning(scenario_entries()), observer.clone());

        let resolution = service.resolve("/missing").await;

        assert_eq!(resolution.target, DEFAULT_URL);
        assert_eq!(resolution.outcome, Outcome::NoMatch);
        assert_eq!(
            observer.events().last().unwrap(),
            "fell_back:/missing:no_match"
        );
    }

    #[tokio::test]
    async fn test_resolve_strips_query_and_decodes() {
        let observer = Arc::new(RecordingObserver::default());
        let entries = vec![RedirectEntry::new("/\"foo\"", "https://foo.example")];
        let service = create_service(repo_returning(entries), observer);

        let resolution = service.resolve("/%22foo%22?x=1").await;

        assert_eq!(resolution.target, "https://foo.example");
    }

    #[tokio::test]
    async fn test_resolve_first_match_wins() {
        let observer = Arc::new(RecordingObserver::default());
        let entries = vec![
            RedirectEntry::new("/dup", "https://first.example"),
            RedirectEntry::new("/dup", "https://second.example"),
        ];
        let service = create_service(repo_returning(entries), observer);

        let resolution = service.resolve("/dup").await;

        assert_eq!(resolution.target, "https://first.example");
    }

    #[tokio::test]
    async fn test_resolve_is_case_sensitive() {
        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(repo_returning(scenario_entries()), observer);

        let resolution = service.resolve("/ABC").await;

        assert_eq!(resolution.target, DEFAULT_URL);
        assert_eq!(resolution.outcome, Outcome::NoMatch);
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(repo_returning(scenario_entries()), observer);

        let first = service.resolve("/abc?utm=1").await;
        let second = service.resolve("/abc?utm=1").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_fetch_error_falls_back() {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo
            .expect_fetch_entries()
            .times(1)
            .returning(|_| Err(FetchError::Token("invalid_grant".to_string())));

        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(mock_repo, observer.clone());

        let resolution = service.resolve("/abc").await;

        assert_eq!(resolution.target, DEFAULT_URL);
        assert_eq!(resolution.outcome, Outcome::Unavailable);
        assert_eq!(
            observer.events(),
            vec![
                "fetch_failed:Links:token".to_string(),
                "fell_back:/abc:unavailable".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_empty_table_falls_back() {
        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(repo_returning(Vec::new()), observer.clone());

        let resolution = service.resolve("/abc").await;

        assert_eq!(resolution.target, DEFAULT_URL);
        assert_eq!(resolution.outcome, Outcome::Unavailable);
        assert_eq!(observer.events(), vec!["fell_back:/abc:unavailable".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_requests_configured_sheet() {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo
            .expect_fetch_entries()
            .withf(|sheet_name| sheet_name == "Links")
            .times(1)
            .returning(|_| Ok(vec![RedirectEntry::new("/a", "b.example")]));

        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(mock_repo, observer);

        let resolution = service.resolve("/a").await;

        assert_eq!(resolution.target, "http://b.example");
    }

    #[tokio::test]
    async fn test_entries_propagates_errors() {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo
            .expect_fetch_entries()
            .returning(|_| Err(FetchError::Decode("expected value".to_string())));

        let observer = Arc::new(RecordingObserver::default());
        let service = create_service(mock_repo, observer.clone());

        let result = service.entries().await;

        assert!(matches!(result.unwrap_err(), FetchError::Decode(_)));
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_find_entry_none() {
        let entries = scenario_entries();
        assert!(find_entry(&entries, "/nope").is_none());
        assert_eq!(find_entry(&entries, "/xyz").unwrap().target, "https://other.org");
    }
}
