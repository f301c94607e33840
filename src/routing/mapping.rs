//! Prefix → host mapping table.
//!
//! # Responsibilities
//! - Parse the JSON routing object (`{"prefix": "host[:port]"}`)
//! - Look up a routing prefix
//! - Hand out one immutable snapshot per request
//!
//! # Design Decisions
//! - A missing key is a normal outcome: the path is passed through unmodified
//! - Unparseable mappings degrade to an empty table (fail-open)
//! - Snapshots are swapped atomically, never mutated in place

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::loader::ConfigError;

/// Immutable mapping from routing prefix to backend host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<String, String>,
}

impl MappingTable {
    /// Parse a JSON object of prefix → host strings.
    pub fn try_from_json(raw: &str) -> Result<Self, ConfigError> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    /// Parse a JSON object, falling back to an empty table when the input is
    /// blank or malformed.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::try_from_json(raw) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed path mapping, forwarding paths unmodified");
                Self::default()
            }
        }
    }

    /// Look up the backend host for a routing prefix.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the table into an ordered map (config representation).
    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries.into_iter().collect()
    }
}

impl From<&BTreeMap<String, String>> for MappingTable {
    fn from(map: &BTreeMap<String, String>) -> Self {
        Self {
            entries: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Live routing map shared by all request handlers.
///
/// Each request takes a [`snapshot`](RoutingMap::snapshot); a reload swaps in
/// a whole new table without disturbing requests already in flight.
#[derive(Debug, Clone)]
pub struct RoutingMap {
    current: Arc<ArcSwap<MappingTable>>,
}

impl RoutingMap {
    pub fn new(table: MappingTable) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// The table to use for the lifetime of one request.
    pub fn snapshot(&self) -> Arc<MappingTable> {
        self.current.load_full()
    }

    /// Install a new table for subsequent requests.
    pub fn replace(&self, table: MappingTable) {
        tracing::info!(prefixes = table.len(), "Routing map updated");
        self.current.store(Arc::new(table));
    }
}

impl Default for RoutingMap {
    fn default() -> Self {
        Self::new(MappingTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_prefix() {
        let table = MappingTable::from_json(r#"{"api": "backend.internal:8080"}"#);
        assert_eq!(table.resolve("api"), Some("backend.internal:8080"));
        assert_eq!(table.resolve("web"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn malformed_json_is_empty() {
        assert!(MappingTable::from_json("{oops").is_empty());
        assert!(MappingTable::from_json("[1, 2]").is_empty());
        assert!(MappingTable::from_json(r#"{"api": 42}"#).is_empty());
        assert!(MappingTable::from_json("").is_empty());
    }

    #[test]
    fn strict_parse_reports_error() {
        let err = MappingTable::try_from_json("{oops").unwrap_err();
        assert!(matches!(err, ConfigError::Mapping(_)));
    }

    #[test]
    fn snapshot_is_stable_across_replace() {
        let map = RoutingMap::new(MappingTable::from_iter([("api", "one.internal")]));
        let before = map.snapshot();

        map.replace(MappingTable::from_iter([("api", "two.internal")]));

        assert_eq!(before.resolve("api"), Some("one.internal"));
        assert_eq!(map.snapshot().resolve("api"), Some("two.internal"));
    }
}
