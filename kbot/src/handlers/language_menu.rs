//! Language menu: `lang`/`language`/`settings`, the literal `/start language`
//! text, and `lang:<code>` callbacks. Registered ahead of the generic command
//! handler so these tokens always route here.

use async_trait::async_trait;
use kbot_core::{Button, Context, Handler, Outcome, Reply, Result, UpdateKind};
use tracing::{info, warn};

const MENU_COMMANDS: &[&str] = &["lang", "language", "settings"];
const START_LANGUAGE_TEXT: &str = "/start language";
const CALLBACK_PREFIX: &str = "lang:";

pub struct LanguageMenuHandler;

impl LanguageMenuHandler {
    fn wants_menu(ctx: &Context) -> bool {
        if ctx.update.text() == Some(START_LANGUAGE_TEXT) {
            return true;
        }
        ctx.update
            .command()
            .is_some_and(|cmd| MENU_COMMANDS.contains(&cmd))
    }

    fn menu_reply(ctx: &Context) -> Reply {
        let languages = ctx
            .translations
            .as_ref()
            .map(|t| t.languages())
            .unwrap_or_default();
        let buttons = languages
            .into_iter()
            .map(|lang| {
                let label = if lang == ctx.language {
                    format!("✅ {lang}")
                } else {
                    lang.clone()
                };
                Button::callback(label, format!("{CALLBACK_PREFIX}{lang}"))
            })
            .collect();
        Reply::Text {
            text: ctx.t("menu.language.title"),
            buttons,
        }
    }
}

#[async_trait]
impl Handler for LanguageMenuHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<Outcome> {
        if let UpdateKind::Callback { id, data } = &ctx.update.kind {
            let Some(code) = data.strip_prefix(CALLBACK_PREFIX) else {
                return Ok(Outcome::Continue);
            };
            let callback_id = id.clone();
            let code = code.to_string();
            // Only codes with a loaded catalog are accepted; a crafted
            // callback must not park the user on a nonexistent language.
            let known = ctx
                .translations
                .as_ref()
                .is_some_and(|t| t.languages().iter().any(|lang| *lang == code));
            if !known {
                warn!(user_id = ctx.update.sender.id, language = %code, "Unknown language code ignored");
                return Ok(Outcome::Reply(Reply::CallbackAck {
                    callback_id,
                    text: None,
                }));
            }
            info!(user_id = ctx.update.sender.id, language = %code, "Language chosen");
            ctx.session.language = Some(code.clone());
            ctx.language = code;
            return Ok(Outcome::Reply(Reply::CallbackAck {
                callback_id,
                text: Some(ctx.t("menu.language.set")),
            }));
        }

        if Self::wants_menu(ctx) {
            return Ok(Outcome::Reply(Self::menu_reply(ctx)));
        }

        Ok(Outcome::Continue)
    }
}
