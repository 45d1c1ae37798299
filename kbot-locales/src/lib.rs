//! # kbot-locales
//!
//! Localization catalog: a directory of `<lang>.yaml` files whose nested string
//! maps are flattened to dotted lookup keys (`menu.language.title`). Lookups
//! fall back to the default language, then to the key itself, so a missing
//! translation never breaks a reply.

use std::collections::HashMap;
use std::path::Path;

use kbot_core::Translations;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LocalesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid locale file {file}: {source}")]
    Parse {
        file: String,
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, LocalesError>;

/// All loaded translation catalogs, immutable after startup.
pub struct Locales {
    default_language: String,
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl Locales {
    /// Loads every `*.yaml` / `*.yml` file in `dir`; the file stem is the
    /// language code. An unreadable directory is an error.
    pub fn load(dir: impl AsRef<Path>, default_language: impl Into<String>) -> Result<Self> {
        let dir = dir.as_ref();
        let default_language = default_language.into();
        let mut catalogs = HashMap::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_yaml = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            );
            if !is_yaml {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let raw = std::fs::read_to_string(&path)?;
            let value: serde_yaml::Value =
                serde_yaml::from_str(&raw).map_err(|source| LocalesError::Parse {
                    file: path.display().to_string(),
                    source,
                })?;
            let mut catalog = HashMap::new();
            flatten("", &value, &mut catalog);
            info!(lang, keys = catalog.len(), "Loaded locale catalog");
            catalogs.insert(lang.to_string(), catalog);
        }

        if !catalogs.contains_key(&default_language) {
            warn!(
                default_language = %default_language,
                "No catalog for the default language; lookups fall back to keys"
            );
        }

        Ok(Self {
            default_language,
            catalogs,
        })
    }

    /// Builds a catalog directly from (lang, key, value) triples. Test seam.
    pub fn from_entries(
        default_language: impl Into<String>,
        entries: &[(&str, &str, &str)],
    ) -> Self {
        let mut catalogs: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (lang, key, value) in entries {
            catalogs
                .entry((*lang).to_string())
                .or_default()
                .insert((*key).to_string(), (*value).to_string());
        }
        Self {
            default_language: default_language.into(),
            catalogs,
        }
    }
}

impl Translations for Locales {
    fn translate(&self, lang: &str, key: &str) -> String {
        if let Some(text) = self.catalogs.get(lang).and_then(|c| c.get(key)) {
            return text.clone();
        }
        if let Some(text) = self
            .catalogs
            .get(&self.default_language)
            .and_then(|c| c.get(key))
        {
            return text.clone();
        }
        key.to_string()
    }

    fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.catalogs.keys().cloned().collect();
        langs.sort();
        langs
    }

    fn default_language(&self) -> &str {
        &self.default_language
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
