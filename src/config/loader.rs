//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{check_mapping_entry, validate_config, ValidationError};
use crate::routing::MappingTable;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid path mapping: {0}")]
    Mapping(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line or through the environment.
///
/// They take precedence over the config file and are re-applied on every reload.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Listen port, replacing the port of `listener.bind_address`.
    pub port: Option<u16>,
    /// Raw JSON object mapping prefixes to hosts (`PATH_MAPPING`).
    pub path_mapping: Option<String>,
}

impl Overrides {
    /// Apply the overrides onto a loaded configuration.
    ///
    /// A malformed `path_mapping` replaces the file mapping with an empty one,
    /// which turns every request into a pass-through. Unusable entries are
    /// dropped with a warning instead of failing validation.
    pub fn apply(&self, config: &mut ProxyConfig) {
        if let Some(port) = self.port {
            config.listener.set_port(port);
        }
        if let Some(raw) = &self.path_mapping {
            let mut entries = MappingTable::from_json(raw).into_entries();
            entries.retain(|prefix, host| {
                let problems = check_mapping_entry(prefix, host);
                for problem in &problems {
                    tracing::warn!(error = %problem, "Ignoring path mapping entry");
                }
                problems.is_empty()
            });
            config.routing.path_mapping = entries;
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the effective configuration: file (if any), then overrides, then validation.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
