//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Dump relayed exchanges (request line, headers, status) for debugging
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - RUST_LOG wins over the built-in default

use axum::http::{HeaderMap, Method, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset or unparseable.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Filter used when `RUST_LOG` is unset.
///
/// Request spans are opened by this crate, so `tower_http`'s own DEBUG
/// events stay off unless `RUST_LOG` asks for them.
fn default_directives(level: &str) -> String {
    format!("path_proxy={}", level)
}

/// Render a header map as `name: value` lines, one line per value.
pub fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            format!(
                "{}: {}",
                name,
                value.to_str().unwrap_or("<non-utf8>")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Log a relayed exchange at debug level.
pub fn dump_exchange(
    method: &Method,
    request_uri: &str,
    request_headers: &HeaderMap,
    status: StatusCode,
    response_headers: &HeaderMap,
) {
    tracing::debug!(
        "{} {}\n{}\n==============================\nHTTP/1.1 {}\n{}",
        method,
        request_uri,
        format_headers(request_headers),
        status,
        format_headers(response_headers),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn formats_every_value() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("*/*"));
        headers.insert("x-id", HeaderValue::from_static("7"));

        let text = format_headers(&headers);
        assert!(text.contains("accept: text/html"));
        assert!(text.contains("accept: */*"));
        assert!(text.contains("x-id: 7"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn non_utf8_values_are_marked() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(&[0xfe, 0xff]).unwrap());
        assert_eq!(format_headers(&headers), "x-raw: <non-utf8>");
    }

    #[test]
    fn default_filter_covers_crate_spans_only() {
        let directives = default_directives("info");
        assert_eq!(directives, "path_proxy=info");
        assert!(directives.parse::<EnvFilter>().is_ok());
    }
}
