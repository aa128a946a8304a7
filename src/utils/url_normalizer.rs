//! Request path and redirect target normalization.
//!
//! All functions are total: they never fail, so the handler can always
//! produce a redirect.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Scheme prepended to targets that do not start with `http`.
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Bytes escaped in a `Location` value, on top of non-ASCII.
///
/// `%` is left alone so targets that are already encoded pass through.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Normalizes a raw request target into the lookup key.
///
/// # Normalization Rules
///
/// 1. **Percent-decoding**: the whole target (path and query) is decoded first
/// 2. **Query string**: everything from the first `?` is dropped, so an
///    encoded `%3F` also truncates
/// 3. **Invalid UTF-8**: replaced with U+FFFD after decoding
/// 4. **Malformed escapes** (e.g. `%zz`): kept literally
///
/// Case, slashes and whitespace are preserved.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_request_path("/%22foo%22?x=1"), "/\"foo\"");
/// assert_eq!(normalize_request_path("/abc"), "/abc");
/// ```
pub fn normalize_request_path(raw_target: &str) -> String {
    let decoded = percent_decode_str(raw_target).decode_utf8_lossy();

    match decoded.split_once('?') {
        Some((path, _)) => path.to_string(),
        None => decoded.into_owned(),
    }
}

/// Normalizes a matched target into a redirect location.
///
/// Targets that do not start with `http` get `http://` prepended. The check is
/// a plain prefix test: `httpsomething.com` is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_target("example.com/page"), "http://example.com/page");
/// assert_eq!(normalize_target("https://example.com"), "https://example.com");
/// ```
pub fn normalize_target(target: &str) -> String {
    if target.starts_with("http") {
        target.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{target}")
    }
}

/// Percent-encodes a redirect target for the `Location` header.
///
/// The result is printable ASCII: non-ASCII characters are sent as their
/// UTF-8 escapes (`café` becomes `caf%C3%A9`) and control characters are
/// escaped instead of splitting the header.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode_location("https://example.com/café"), "https://example.com/caf%C3%A9");
/// assert_eq!(encode_location("https://example.com/a%20b"), "https://example.com/a%20b");
/// ```
pub fn encode_location(target: &str) -> String {
    utf8_percent_encode(target, LOCATION).to_string()
}
