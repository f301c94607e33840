//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path ("/api/users/1")
//!     → mapping.rs (prefix → host lookup on a per-request snapshot)
//!     → rewrite.rs (substitute, normalize scheme, validate)
//!     → Return: target Url or RewriteError
//! ```
//!
//! # Design Decisions
//! - Mapping tables are immutable; reloads swap in a new table
//! - Unmapped prefixes pass the path through instead of failing
//! - Deterministic: same path and table always yield the same target

pub mod mapping;
pub mod rewrite;

pub use mapping::{MappingTable, RoutingMap};
pub use rewrite::{rewrite, RewriteError};
