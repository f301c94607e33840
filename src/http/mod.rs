//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, landing page, proxy handler)
//!     → request.rs (request ID span)
//!     → [routing rewrites the path into a target URL]
//!     → forward.rs (single upstream call, streamed body)
//!     → response.rs (relay status, headers, body)
//!     → Send to client
//! ```

pub mod forward;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, Forwarder};
pub use server::HttpServer;
