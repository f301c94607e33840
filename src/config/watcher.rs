//! Configuration file watcher for hot reload of the routing map.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{resolve_config, ConfigError, Overrides};
use crate::routing::{MappingTable, RoutingMap};

/// A watcher that monitors the configuration file and refreshes the routing map.
pub struct ConfigWatcher {
    path: PathBuf,
    overrides: Overrides,
    routing: RoutingMap,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Overrides are re-applied on every reload so `PATH_MAPPING` keeps
    /// precedence over the file.
    pub fn new(path: &Path, overrides: Overrides, routing: RoutingMap) -> Self {
        Self {
            path: path.to_path_buf(),
            overrides,
            routing,
        }
    }

    /// Reload the file once and install its mapping.
    ///
    /// On failure the current mapping stays in place.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = resolve_config(Some(&self.path), &self.overrides)?;
        self.routing
            .replace(MappingTable::from(&config.routing.path_mapping));
        Ok(())
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, ConfigError> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        if let Err(e) = self.reload() {
                            tracing::error!(
                                "Failed to reload config: {}. Keeping current routing map.",
                                e
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
