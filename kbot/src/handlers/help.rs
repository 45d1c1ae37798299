//! Built-in commands `start`, `help`, `search`: localized help text plus the
//! inline-search trigger and the project link, one button per row.

use async_trait::async_trait;
use kbot_core::{Button, Context, Handler, Outcome, Reply, Result};

const HELP_COMMANDS: &[&str] = &["start", "help", "search"];
const PROJECT_URL: &str = "https://github.com/kbot-dev/kbot";

pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<Outcome> {
        let is_help = ctx
            .update
            .command()
            .is_some_and(|cmd| HELP_COMMANDS.contains(&cmd));
        if !is_help {
            return Ok(Outcome::Continue);
        }

        Ok(Outcome::Reply(Reply::Text {
            text: ctx.t("help"),
            buttons: vec![
                Button::switch_inline("inline search…", ""),
                Button::url("GitHub", PROJECT_URL),
            ],
        }))
    }
}
