//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate routing prefixes and backend hosts
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("routing prefix must not be empty")]
    EmptyPrefix,

    #[error("routing prefix {0:?} must not contain '/'")]
    PrefixWithSlash(String),

    #[error("backend host for prefix {0:?} is empty")]
    EmptyHost(String),

    #[error("timeout {0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Problems with a single prefix → host entry.
pub fn check_mapping_entry(prefix: &str, host: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    } else if prefix.contains('/') {
        errors.push(ValidationError::PrefixWithSlash(prefix.to_string()));
    }

    if host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost(prefix.to_string()));
    }

    errors
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (prefix, host) in &config.routing.path_mapping {
        errors.extend(check_mapping_entry(prefix, host));
    }

    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
