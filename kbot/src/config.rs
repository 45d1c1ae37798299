//! App config: file paths, default language, and the production switch.
//! Loaded from environment variables, with working defaults for local runs.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Everything the assembly needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// KBOT_ENV == "production" disables the timing probe and verbose
    /// resolver query logging.
    pub production: bool,
    /// LOG_FILE
    pub log_file: String,
    /// SESSION_FILE
    pub session_file: PathBuf,
    /// LOCALES_DIR
    pub locales_dir: PathBuf,
    /// CATALOG_FILE (resource-key catalog; missing file aborts startup)
    pub catalog_file: PathBuf,
    /// ENTITIES_FILE (optional entity seed for the in-memory resolver)
    pub entities_file: Option<PathBuf>,
    /// DEFAULT_LANGUAGE
    pub default_language: String,
    /// CLI token override; otherwise the token files / BOT_TOKEN apply.
    pub token: Option<String>,
}

impl AppConfig {
    /// Loads from environment variables. `token` overrides every token source.
    pub fn load(token: Option<String>) -> Result<Self> {
        let production = env::var("KBOT_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/kbot.log".to_string());
        let session_file = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("persist/sessions.json"));
        let locales_dir = env::var("LOCALES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("locales"));
        let catalog_file = env::var("CATALOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("kb-items.yaml"));
        let entities_file = env::var("ENTITIES_FILE").ok().map(PathBuf::from);
        let default_language =
            env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string());

        Ok(Self {
            production,
            log_file,
            session_file,
            locales_dir,
            catalog_file,
            entities_file,
            default_language,
            token,
        })
    }
}
