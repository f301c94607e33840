//! Path-prefix forwarding proxy library.
//!
//! An inbound `GET /api/users/1` is rewritten through the prefix mapping
//! (`api → backend.internal:8080`) into `http://backend.internal:8080/users/1`,
//! forwarded once, and the upstream response is relayed back as-is.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{MappingTable, RoutingMap};
