//! HTTP server setup and the per-request forwarding handler.
//!
//! # Responsibilities
//! - Create Axum Router with the landing and proxy handlers
//! - Wire up request tracing
//! - Bind server to listener with graceful shutdown
//! - Rewrite each request path into a target URL
//! - Forward to the target and relay the response
//!
//! # Request States
//! ```text
//! START ──"/"──▶ ROOT_SHORT_CIRCUIT (empty response)
//!   │
//!   ▼
//! RESOLVE ──PrefixOnly / InvalidUrl──▶ REJECT_NOT_FOUND (404)
//!   │
//!   ▼
//! FORWARD ──transport error──▶ RELAY_ERROR (500)
//!   │
//!   ▼
//! RELAY_SUCCESS (upstream status, headers, body)
//! ```

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::forward::{ForwardError, Forwarder};
use crate::http::request::RequestSpan;
use crate::http::response::relay;
use crate::observability::logging::dump_exchange;
use crate::routing::{rewrite, RoutingMap};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routing: RoutingMap,
    pub forwarder: Forwarder,
    pub dump_exchanges: bool,
}

/// HTTP server for the path proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading its prefix mapping from `routing`.
    pub fn new(config: &ProxyConfig, routing: RoutingMap) -> Result<Self, ForwardError> {
        let state = AppState {
            routing,
            forwarder: Forwarder::new(&config.timeouts)?,
            dump_exchanges: config.observability.dump_exchanges,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(landing_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
    }

    /// The router, for serving elsewhere or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The bare root is an inert landing page: nothing is forwarded.
async fn landing_handler() {}

/// Main proxy handler.
/// Rewrites the path, forwards once, relays the outcome.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let table = state.routing.snapshot();
    let target = match rewrite(&table, path_and_query) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(path = %path_and_query, reason = %e, "Rejecting unroutable request");
            return e.into_response();
        }
    };

    tracing::debug!(
        method = %parts.method,
        path = %path_and_query,
        target = %target,
        "Forwarding request"
    );

    let upstream = match state
        .forwarder
        .forward(parts.method.clone(), target.clone(), &parts.headers, body)
        .await
    {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!(
                method = %parts.method,
                target = %target,
                error = %e,
                "Upstream request failed"
            );
            return e.into_response();
        }
    };

    tracing::info!(
        method = %parts.method,
        target = %target,
        status = upstream.status().as_u16(),
        "{} {}",
        parts.method,
        target
    );

    if state.dump_exchanges {
        dump_exchange(
            &parts.method,
            path_and_query,
            &parts.headers,
            upstream.status(),
            upstream.headers(),
        );
    }

    relay(upstream)
}
