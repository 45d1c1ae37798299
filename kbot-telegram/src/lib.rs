//! # kbot-telegram
//!
//! Telegram layer: token loading, update conversion, reply delivery, command
//! registration, platform error classification, and the sequential
//! long-polling runner. Handles only Telegram connectivity; all routing lives
//! in the handler pipeline.

mod adapters;
mod commands;
mod error;
mod runner;
mod sender;
mod token;

pub use adapters::to_core_update;
pub use commands::{register_commands, COMMAND_TABLE};
pub use error::{classify_api_description, classify_request_error, should_report};
pub use runner::run_polling;
pub use sender::TelegramSender;
pub use token::{load_token, TokenSources};
