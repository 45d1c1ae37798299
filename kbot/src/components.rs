//! Component factory: builds the services the pipeline depends on. Isolates
//! assembly from the runner; every service is explicit, no globals.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use kbot_core::{EntityResolver, Translations};
use kbot_locales::Locales;
use knowledge_base::{InMemoryResolver, ResourceCatalog};
use session_store::SessionStore;
use tracing::info;

use crate::config::AppConfig;

/// Services shared by the middleware and handlers.
pub struct Components {
    pub sessions: Arc<SessionStore>,
    pub translations: Arc<dyn Translations>,
    pub resolver: Arc<dyn EntityResolver>,
}

/// Builds all services from config. A missing resource catalog or an
/// unreadable locales directory is fatal.
pub fn build_components(config: &AppConfig) -> Result<Components> {
    let catalog = ResourceCatalog::from_yaml_file(&config.catalog_file)
        .with_context(|| {
            format!(
                "Failed to read resource catalog {}",
                config.catalog_file.display()
            )
        })?;

    let sessions = Arc::new(
        SessionStore::open(&config.session_file).with_context(|| {
            format!("Failed to open session file {}", config.session_file.display())
        })?,
    );

    let translations: Arc<dyn Translations> = Arc::new(
        Locales::load(&config.locales_dir, &config.default_language).with_context(|| {
            format!("Failed to load locales from {}", config.locales_dir.display())
        })?,
    );

    let resolver = match &config.entities_file {
        Some(path) => InMemoryResolver::from_yaml_file(path)
            .with_context(|| format!("Failed to read entity table {}", path.display()))?,
        None => {
            info!("No ENTITIES_FILE set; starting with an empty entity table");
            InMemoryResolver::new()
        }
    };
    let resolver: Arc<dyn EntityResolver> = Arc::new(
        resolver
            .with_catalog(catalog)
            .with_query_logging(!config.production),
    );

    Ok(Components {
        sessions,
        translations,
        resolver,
    })
}
