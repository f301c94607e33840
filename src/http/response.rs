//! Response relay.
//!
//! # Responsibilities
//! - Copy the upstream status code unchanged
//! - Copy one value per upstream header name
//! - Stream the upstream body back without buffering or transformation

use axum::body::Body;
use axum::response::Response;

use crate::http::headers::first_values;

/// Turn an upstream response into the response sent to the caller.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = first_values(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
