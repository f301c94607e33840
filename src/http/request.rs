//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Attach it to the request's tracing span
//!
//! # Design Decisions
//! - The ID lives in the span only; neither the upstream request nor the
//!   relayed response gains a header
//! - Spans are opened at INFO so the default filter shows them

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;
use uuid::Uuid;

/// Opens one INFO span per request carrying a fresh request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    }
}
