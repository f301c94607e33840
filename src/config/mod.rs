//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI/env overrides (PORT, PATH_MAPPING)
//!     → loader.rs (parse, deserialize, apply overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config, re-applies overrides
//!     → validation.rs validates
//!     → atomic swap of the routing map
//! ```
//!
//! # Design Decisions
//! - Only the routing map is hot-reloaded; listener and timeouts need a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{ConfigError, Overrides};
pub use schema::ProxyConfig;
pub use schema::ListenerConfig;
pub use schema::RoutingConfig;
pub use schema::TimeoutConfig;
