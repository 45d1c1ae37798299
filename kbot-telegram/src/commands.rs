//! Command table registration. The table is fixed and declarative; sending it
//! is idempotent, so startup registers it unconditionally.

use kbot_core::{KbotError, Result};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::info;

/// Commands advertised to Telegram clients for autocomplete.
pub const COMMAND_TABLE: &[(&str, &str)] = &[
    ("location", "Show info on how to use the location feature"),
    ("help", "Show help"),
    ("language", "set your language"),
    ("settings", "set your language"),
];

/// Registers the command table with the platform, once at startup.
pub async fn register_commands(bot: &Bot) -> Result<()> {
    let commands: Vec<BotCommand> = COMMAND_TABLE
        .iter()
        .map(|(command, description)| BotCommand::new(*command, *description))
        .collect();
    bot.set_my_commands(commands)
        .await
        .map_err(|e| KbotError::Platform(crate::error::classify_request_error(e)))?;
    info!(count = COMMAND_TABLE.len(), "Registered bot commands");
    Ok(())
}
