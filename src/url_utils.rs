//! URL Utility Functions
//!
//! Validation of request URLs and resolution of relative `href`/`src`
//! values against the page URL.

use url::Url;

use crate::error::{Error, Result};

/// Check if a string is a valid absolute HTTP(S) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a request URL, rejecting anything that is not absolute HTTP(S).
pub fn parse_http_url(s: &str) -> Result<Url> {
    let trimmed = s.trim();
    let url = Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "unsupported scheme `{}` in {trimmed}",
            url.scheme()
        )));
    }
    if url.host().is_none() {
        return Err(Error::InvalidUrl(format!("missing host in {trimmed}")));
    }

    Ok(url)
}

/// Whether the string uses an HTTP or HTTPS scheme.
///
/// This is the cheap pre-check applied at the service boundary; it does not
/// require the rest of the URL to parse.
#[must_use]
pub fn has_http_scheme(s: &str) -> bool {
    let lower = s.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Convert a relative or absolute URL to absolute form.
///
/// # Arguments
/// * `url_str` - The URL to resolve (can be relative or absolute)
/// * `base` - The base URL for resolution
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Preserve special URLs unchanged
    if url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    // If already absolute, return as-is
    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Resolve against an optional base. Without a usable base the value is
/// returned trimmed but otherwise unchanged.
#[must_use]
pub fn resolve(url_str: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => create_absolute_url(url_str, base),
        None => url_str.trim().to_string(),
    }
}
