//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, exchange dumps)
//!     → tower-http TraceLayer (one span per inbound request)
//!     → request IDs (UUID v4 span field, never a header)
//! ```
//!
//! # Design Decisions
//! - Structured fields over formatted strings where a value is queried
//! - Request ID flows through every log line of a request via its span

pub mod logging;
