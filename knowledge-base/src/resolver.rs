//! In-memory entity resolver: the shipped [`EntityResolver`] implementation,
//! seedable from a YAML entity list. A remote backend replaces this by
//! implementing the same trait; nothing in the pipeline changes.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use kbot_core::{Entity, EntityResolver, Location};
use tracing::info;

use crate::{ResourceCatalog, Result};

/// Entity lookup over an in-memory table.
pub struct InMemoryResolver {
    entities: HashMap<String, Entity>,
    /// Resource keys resolve to their registered entity id before lookup.
    catalog: Option<ResourceCatalog>,
    /// Verbose per-query logging, enabled outside production.
    log_queries: bool,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            catalog: None,
            log_queries: false,
        }
    }

    pub fn with_query_logging(mut self, log_queries: bool) -> Self {
        self.log_queries = log_queries;
        self
    }

    /// Registers the resource-key catalog so `lookup("menu.language")`
    /// resolves through it.
    pub fn with_catalog(mut self, catalog: ResourceCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Parses a YAML list of entities.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let entities: Vec<Entity> = serde_yaml::from_str(raw)?;
        let mut resolver = Self::new();
        for entity in entities {
            resolver.insert(entity);
        }
        Ok(resolver)
    }

    /// Reads a YAML entity list from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let resolver = Self::from_yaml_str(&raw)?;
        info!(
            path = %path.display(),
            entities = resolver.entities.len(),
            "Loaded entity table"
        );
        Ok(resolver)
    }

    fn normalize(id: &str) -> String {
        id.trim_start_matches('/').to_ascii_uppercase()
    }
}

impl Default for InMemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityResolver for InMemoryResolver {
    async fn lookup(&self, id: &str) -> kbot_core::Result<Option<Entity>> {
        let id = match self.catalog.as_ref().and_then(|c| c.entity_id(id)) {
            Some(mapped) => mapped.to_string(),
            None => Self::normalize(id),
        };
        if self.log_queries {
            info!(entity_id = %id, "kb lookup");
        }
        Ok(self.entities.get(&id).cloned())
    }

    async fn search(&self, query: &str, limit: usize) -> kbot_core::Result<Vec<Entity>> {
        if self.log_queries {
            info!(query = %query, "kb search");
        }
        let needle = query.to_lowercase();
        let mut hits: Vec<Entity> = self
            .entities
            .values()
            .filter(|e| {
                e.label.to_lowercase().contains(&needle)
                    || e.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn nearby(&self, location: Location, limit: usize) -> kbot_core::Result<Vec<Entity>> {
        if self.log_queries {
            info!(
                latitude = location.latitude,
                longitude = location.longitude,
                "kb nearby"
            );
        }
        let mut located: Vec<(f64, Entity)> = self
            .entities
            .values()
            .filter_map(|e| {
                let at = e.location?;
                // Planar approximation is fine for ranking nearby points.
                let dlat = at.latitude - location.latitude;
                let dlon = at.longitude - location.longitude;
                Some((dlat * dlat + dlon * dlon, e.clone()))
            })
            .collect();
        located.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(located.into_iter().take(limit).map(|(_, e)| e).collect())
    }
}
