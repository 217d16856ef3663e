//! Format rules for codes and target URLs.

use crate::shortcode::{MAX_LENGTH, MIN_LENGTH};
use url::Url;

/// Codes that collide with the gateway's own routing namespace and must
/// never be resolved as links.
pub const RESERVED_CODES: &[&str] = &["api", "healthz", "code", "_next"];

/// Returns `true` if the trimmed code matches `^[A-Za-z0-9]{6,8}$`.
pub fn is_valid_code(code: &str) -> bool {
    let code = code.trim();
    (MIN_LENGTH..=MAX_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns `true` if the trimmed string is an absolute `http` or `https` URL.
///
/// Strings that fail to parse are reported as invalid, never as errors.
/// Control characters are rejected even where the parser would strip them:
/// the stored string is sent verbatim as a `Location` header.
pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.bytes().any(|b| b.is_ascii_control()) {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Trims surrounding whitespace. Nothing else about the URL is rewritten.
pub fn normalize_url(url: &str) -> String {
    url.trim().to_owned()
}

/// Returns `true` if the code belongs to the reserved routing namespace.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code.trim())
}
