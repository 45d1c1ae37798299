//! Access token loading: a secrets directory is preferred, then a local file,
//! then the BOT_TOKEN environment variable. No source at all is fatal.

use std::path::PathBuf;

use kbot_core::{KbotError, Result};
use tracing::info;

/// Where the token may come from, in order of preference.
pub struct TokenSources {
    pub secrets_dir: PathBuf,
    pub local_file: PathBuf,
}

impl Default for TokenSources {
    fn default() -> Self {
        Self {
            secrets_dir: PathBuf::from("/run/secrets"),
            local_file: PathBuf::from("bot-token.txt"),
        }
    }
}

/// Loads the bot token. When the secrets directory exists, only
/// `<secrets_dir>/bot-token.txt` is considered; otherwise the local file,
/// then the BOT_TOKEN environment variable.
pub fn load_token(sources: &TokenSources) -> Result<String> {
    load_token_with_env(sources, std::env::var("BOT_TOKEN").ok())
}

fn load_token_with_env(sources: &TokenSources, env_token: Option<String>) -> Result<String> {
    let file = if sources.secrets_dir.exists() {
        sources.secrets_dir.join("bot-token.txt")
    } else {
        sources.local_file.clone()
    };

    if file.exists() {
        let token = std::fs::read_to_string(&file)?.trim().to_string();
        if token.is_empty() {
            return Err(KbotError::Config(format!(
                "Token file {} is empty",
                file.display()
            )));
        }
        info!(path = %file.display(), "Loaded bot token from file");
        return Ok(token);
    }

    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        info!("Loaded bot token from BOT_TOKEN");
        return Ok(token.trim().to_string());
    }

    Err(KbotError::Config(format!(
        "No bot token: neither {} nor BOT_TOKEN is available",
        file.display()
    )))
}
