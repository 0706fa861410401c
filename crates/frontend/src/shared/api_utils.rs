//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::DEFAULT_API_PORT;

/// Get the base URL for API requests
///
/// A base baked in at build time through `EVENTDESK_API_BASE` wins.
/// Otherwise it is derived from the current window location, using
/// [`DEFAULT_API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000/api"
/// - Empty string if window is not available
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/org/members/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    if let Some(base) = option_env!("EVENTDESK_API_BASE") {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}/api", protocol, hostname, DEFAULT_API_PORT)
}

/// Build a full API URL from an endpoint path
///
/// # Arguments
/// * `path` - The endpoint path, e.g. "/org/members"
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encode one path segment (ids coming from the server are opaque).
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:3000/api", "/org/mine"), "http://h:3000/api/org/mine");
        assert_eq!(join_url("http://h:3000/api", "org/mine"), "http://h:3000/api/org/mine");
    }

    #[test]
    fn test_segment_escapes() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
