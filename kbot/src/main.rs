//! Binary for the knowledge-base Telegram bot.

use anyhow::Result;
use clap::Parser;
use kbot::{run, AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = AppConfig::load(token)?;
            run(config).await
        }
    }
}
