//! Outbound request execution.
//!
//! # Responsibilities
//! - Build the upstream request from the inbound method, headers and body
//! - Stream the inbound body without buffering
//! - Report transport failures with their full cause chain
//!
//! # Design Decisions
//! - Exactly one attempt per inbound request, no retries
//! - Redirects are relayed, not followed
//! - Connect and request timeouts come from config; unset means unbounded

use axum::body::{Body, HttpBody};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::redirect::Policy;
use thiserror::Error;
use url::Url;

use crate::config::TimeoutConfig;
use crate::http::headers::first_values;

/// Errors raised while talking to the upstream.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// DNS, connect, TLS, timeout or protocol failure.
    #[error("{0}")]
    Transport(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Render an error followed by each of its sources.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// HTTP client wrapper that performs a single forward.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder with the configured outbound timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, ForwardError> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::none())
            .no_proxy();
        if let Some(connect) = timeouts.connect() {
            builder = builder.connect_timeout(connect);
        }
        if let Some(request) = timeouts.request() {
            builder = builder.timeout(request);
        }

        let client = builder.build().map_err(ForwardError::Client)?;
        Ok(Self { client })
    }

    /// Send `method target` upstream with the inbound headers and body.
    ///
    /// The body is handed to the client as a stream and read at most once.
    pub async fn forward(
        &self,
        method: Method,
        target: Url,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<reqwest::Response, ForwardError> {
        let mut request = self
            .client
            .request(method, target)
            .headers(first_values(headers));

        if !body.is_end_stream() {
            request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        request
            .send()
            .await
            .map_err(|e| ForwardError::Transport(error_chain(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn chain_includes_sources() {
        assert_eq!(error_chain(&Outer(Inner)), "outer: inner");
    }

    #[test]
    fn builds_with_default_timeouts() {
        assert!(Forwarder::new(&TimeoutConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let forwarder = Forwarder::new(&TimeoutConfig::default()).unwrap();
        let target = Url::parse(&format!("http://{}/x", addr)).unwrap();
        let err = forwarder
            .forward(Method::GET, target, &HeaderMap::new(), Body::empty())
            .await
            .unwrap_err();

        match err {
            ForwardError::Transport(text) => assert!(!text.is_empty()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
