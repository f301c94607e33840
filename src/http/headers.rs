//! Header copying policy shared by both directions of a forward.
//!
//! Every header name keeps exactly one value, the first one seen. Multi-value
//! headers (`Accept`, `Set-Cookie`, ...) are collapsed on purpose.
//! Connection-level headers are left to the client and server framing.

use axum::http::{HeaderMap, HeaderName};

/// Headers that describe a single transport hop and are never copied.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "host"
            | "connection"
            | "keep-alive"
            | "proxy-connection"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Copy one value (the first) per header name, skipping hop-by-hop headers.
pub fn first_values(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.keys_len());
    for name in headers.keys() {
        if is_hop_by_hop(name) {
            continue;
        }
        if let Some(value) = headers.get(name) {
            out.insert(name.clone(), value.clone());
        }
    }
    out
}
