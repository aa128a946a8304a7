//! Handler for short link redirects.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::config::DEFAULT_TARGET_URL;
use crate::state::AppState;
use crate::utils::url_normalizer::encode_location;

/// Redirects any request to the target its path resolves to.
///
/// # Endpoint
///
/// Router fallback: every method, every path.
///
/// # Request Flow
///
/// 1. Take the raw request target (`path?query`)
/// 2. Resolve it via [`crate::application::services::RedirectService`]
///    (fresh table fetch, exact match, default fallback)
/// 3. Percent-encode the target so the header is printable ASCII
/// 4. Return `302 Found` with `Location` set to the target and an empty body
///
/// # Errors
///
/// None. Fetch failures and unmatched paths redirect to the default target,
/// as does a target that still fails header validation.
pub async fn redirect_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let raw_target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let resolution = state.redirect_service.resolve(raw_target).await;
    let default_url = state.redirect_service.default_url();

    let location = HeaderValue::from_str(&encode_location(&resolution.target))
        .or_else(|_| {
            warn!(
                target_url = %resolution.target.escape_debug(),
                "Target is not a valid Location header, using default URL"
            );
            HeaderValue::from_str(&encode_location(default_url))
        })
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_TARGET_URL));

    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
