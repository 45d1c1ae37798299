//! Reply delivery: maps the transport-agnostic [`Reply`] onto Telegram calls.

use kbot_core::{Button, ButtonAction, InlineResult, KbotError, Reply, Result};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryId,
    InlineQueryResult, InlineQueryResultArticle, InputMessageContent, InputMessageContentText,
};

use crate::error::classify_request_error;

/// Sends pipeline replies through a teloxide bot.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Delivers one reply. `chat_id` is required for text replies; inline and
    /// callback answers address their query directly.
    pub async fn deliver(&self, chat_id: Option<i64>, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text { text, buttons } => {
                let chat_id = chat_id
                    .ok_or_else(|| KbotError::Handler("text reply without a chat".into()))?;
                let request = self.bot.send_message(ChatId(chat_id), text);
                if buttons.is_empty() {
                    request.await
                } else {
                    request.reply_markup(keyboard(&buttons)?).await
                }
                .map_err(|e| KbotError::Platform(classify_request_error(e)))?;
            }
            Reply::InlineResults { query_id, results } => {
                let articles: Vec<InlineQueryResult> =
                    results.into_iter().map(article_from).collect();
                self.bot
                    .answer_inline_query(InlineQueryId(query_id), articles)
                    .await
                    .map_err(|e| KbotError::Platform(classify_request_error(e)))?;
            }
            Reply::CallbackAck { callback_id, text } => {
                let request = self.bot.answer_callback_query(CallbackQueryId(callback_id));
                match text {
                    Some(text) => request.text(text).await,
                    None => request.await,
                }
                .map_err(|e| KbotError::Platform(classify_request_error(e)))?;
            }
        }
        Ok(())
    }
}

fn article_from(result: InlineResult) -> InlineQueryResult {
    let content = InputMessageContent::Text(InputMessageContentText::new(result.text));
    let mut article = InlineQueryResultArticle::new(result.id, result.title, content);
    if let Some(description) = result.description {
        article = article.description(description);
    }
    InlineQueryResult::Article(article)
}

/// One button per row, matching the single-column menus the bot sends.
fn keyboard(buttons: &[Button]) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(buttons.len());
    for button in buttons {
        let key = match &button.action {
            ButtonAction::SwitchInline(query) => {
                InlineKeyboardButton::switch_inline_query_current_chat(
                    button.label.clone(),
                    query.clone(),
                )
            }
            ButtonAction::Url(url) => {
                let url = reqwest::Url::parse(url)
                    .map_err(|e| KbotError::Handler(format!("invalid button URL {url}: {e}")))?;
                InlineKeyboardButton::url(button.label.clone(), url)
            }
            ButtonAction::Callback(data) => {
                InlineKeyboardButton::callback(button.label.clone(), data.clone())
            }
        };
        rows.push(vec![key]);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}
