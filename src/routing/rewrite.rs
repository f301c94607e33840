//! Request path → target URL rewriting.
//!
//! # Pipeline
//! ```text
//! "/api/users/1?x=1"
//!     → strip leading '/'         "api/users/1?x=1"
//!     → routing prefix            "api"
//!     → mapping lookup            "backend.internal:8080"
//!     → substitute prefix         "backend.internal:8080/users/1?x=1"
//!     → normalize scheme          "http://backend.internal:8080/users/1?x=1"
//!     → validate                  Url
//! ```
//!
//! Lookup and substitution always run before normalization, and
//! normalization before validation.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use url::Url;

use crate::routing::MappingTable;

/// Why a request path could not be turned into a forwardable URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// The path is a mapped prefix with nothing after it.
    #[error("Not Found")]
    PrefixOnly,

    /// The rewritten string is not a URL with a dotted host.
    #[error("Invalid URL")]
    InvalidUrl,
}

impl IntoResponse for RewriteError {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.to_string()).into_response()
    }
}

/// First path segment: everything before the first '/'.
pub fn routing_prefix(path: &str) -> &str {
    match path.split_once('/') {
        Some((prefix, _)) => prefix,
        None => path,
    }
}

/// Prepend `http://` unless the string mentions "http" anywhere.
///
/// This is a substring test, not a scheme test: `httpbin.org/get` is left
/// untouched.
pub fn normalize_scheme(raw: &str) -> Cow<'_, str> {
    if raw.contains("http") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("http://{}", raw))
    }
}

/// Parse a candidate URL and require a non-empty host containing a '.'.
pub fn validate_target(raw: &str) -> Result<Url, RewriteError> {
    let url = Url::parse(raw).map_err(|_| RewriteError::InvalidUrl)?;
    match url.host_str() {
        Some(host) if host.contains('.') => Ok(url),
        _ => Err(RewriteError::InvalidUrl),
    }
}

/// Rewrite an inbound path-and-query into the URL to forward to.
pub fn rewrite(table: &MappingTable, path_and_query: &str) -> Result<Url, RewriteError> {
    let requested = path_and_query.strip_prefix('/').unwrap_or(path_and_query);
    let prefix = routing_prefix(requested);

    let candidate = match table.resolve(prefix) {
        Some(_) if requested == prefix => return Err(RewriteError::PrefixOnly),
        Some(host) => {
            let rest = &requested[prefix.len()..];
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            format!("{}/{}", host, rest)
        }
        None => requested.to_string(),
    };

    validate_target(&normalize_scheme(&candidate))
}
