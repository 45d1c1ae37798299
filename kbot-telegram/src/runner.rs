//! Long-polling runner: one logical worker pulling updates sequentially and
//! driving each through the pipeline before touching the next, so a user's
//! session is never mutated by two in-flight updates.

use std::time::Duration;

use handler_pipeline::Pipeline;
use kbot_core::{Context, Outcome, Result};
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use tracing::{error, info, instrument};

use crate::adapters::to_core_update;
use crate::commands::register_commands;
use crate::error::{classify_request_error, report};
use crate::sender::TelegramSender;

/// Registers the command table, then polls updates forever. Startup failures
/// (credentials, command registration) abort; per-update failures go through
/// the error filter and the loop continues.
#[instrument(skip(bot, pipeline))]
pub async fn run_polling(bot: Bot, pipeline: Pipeline) -> anyhow::Result<()> {
    let me = bot.get_me().await?;
    register_commands(&bot).await?;
    info!(username = ?me.username, "Bot started");

    let sender = TelegramSender::new(bot.clone());
    let mut offset: i32 = 0;

    loop {
        let updates = match bot
            .get_updates()
            .offset(offset)
            .timeout(30)
            .allowed_updates(vec![
                AllowedUpdate::Message,
                AllowedUpdate::InlineQuery,
                AllowedUpdate::CallbackQuery,
            ])
            .await
        {
            Ok(updates) => updates,
            Err(e) => {
                error!(error = %classify_request_error(e), "get_updates failed, backing off");
                tokio::time::sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        for update in updates {
            offset = update.id.as_offset();
            let Some(core_update) = to_core_update(&update) else {
                continue;
            };
            let mut ctx = Context::new(core_update);
            if let Err(err) = dispatch_one(&pipeline, &sender, &mut ctx).await {
                report(&err);
            }
        }
    }
}

/// Runs one update to completion: dispatch, then deliver the reply if the
/// pipeline produced one.
async fn dispatch_one(
    pipeline: &Pipeline,
    sender: &TelegramSender,
    ctx: &mut Context,
) -> Result<()> {
    let outcome = pipeline.dispatch(ctx).await?;
    if let Outcome::Reply(reply) = outcome {
        sender.deliver(ctx.update.chat_id, reply).await?;
    }
    Ok(())
}
