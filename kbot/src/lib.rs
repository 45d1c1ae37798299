//! # kbot
//!
//! Assembly of the knowledge-base bot: env config, explicitly constructed
//! services, the fixed pipeline order, and the domain handlers. There are no
//! ambient singletons; every service is built here and passed by reference
//! into the pipeline builder.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;

pub use chain::build_pipeline;
pub use cli::{Cli, Commands};
pub use components::{build_components, Components};
pub use config::AppConfig;

use anyhow::Result;
use kbot_core::init_tracing;
use kbot_telegram::{load_token, run_polling, TokenSources};
use tracing::info;

/// Main entry: logging, token, services, pipeline, then the polling loop.
/// Token and catalog failures abort before any update is received.
pub async fn run(config: AppConfig) -> Result<()> {
    if let Some(parent) = std::path::Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    init_tracing(&config.log_file)?;

    let token = match &config.token {
        Some(token) => token.clone(),
        None => load_token(&TokenSources::default())?,
    };

    let components = build_components(&config)?;
    let pipeline = build_pipeline(&components, config.production);

    info!(
        production = config.production,
        sessions = components.sessions.len(),
        "Initializing bot"
    );

    let bot = teloxide::Bot::new(token);
    run_polling(bot, pipeline).await
}
