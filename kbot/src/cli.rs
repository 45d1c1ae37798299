//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kbot")]
#[command(about = "Knowledge-base Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override the token files).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}
