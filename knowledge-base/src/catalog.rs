//! Resource-key catalog: nested YAML maps flattened to dotted keys, each
//! leaf naming an entity id. Read once at startup; a missing or malformed
//! file aborts startup.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::Result;

/// Immutable key → entity-id mapping handed to handlers that need
/// well-known entities (menu labels, canned replies).
pub struct ResourceCatalog {
    keys: HashMap<String, String>,
}

impl ResourceCatalog {
    /// Parses a catalog from YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
        let mut keys = HashMap::new();
        flatten("", &value, &mut keys);
        Ok(Self { keys })
    }

    /// Reads and parses the catalog file. Errors here are fatal to startup.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&raw)?;
        info!(
            path = %path.display(),
            keys = catalog.len(),
            "Loaded resource catalog"
        );
        Ok(catalog)
    }

    /// Entity id registered under `key`, if any.
    pub fn entity_id(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn flatten(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let Some(k) = k.as_str() else { continue };
                let key = if prefix.is_empty() {
                    k.to_string()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        serde_yaml::Value::String(s) => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), s.clone());
            }
        }
        _ => {}
    }
}
