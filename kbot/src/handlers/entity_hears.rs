//! Entity recognition over plain messages: the first token that looks like an
//! entity id (`Q42`, `P31`, optionally `/`-prefixed) is looked up and
//! answered; everything else continues down the pipeline.

use async_trait::async_trait;
use kbot_core::{Context, Entity, Handler, Outcome, Reply, Result};
use tracing::debug;

pub struct EntityHearsHandler;

fn first_entity_id(text: &str) -> Option<String> {
    text.split_whitespace().find_map(|word| {
        let token = word
            .trim_start_matches('/')
            .trim_end_matches(|c: char| !c.is_ascii_alphanumeric());
        let mut chars = token.chars();
        let head = chars.next()?.to_ascii_uppercase();
        let rest = chars.as_str();
        if matches!(head, 'Q' | 'P')
            && !rest.is_empty()
            && rest.bytes().all(|b| b.is_ascii_digit())
        {
            Some(format!("{head}{rest}"))
        } else {
            None
        }
    })
}

pub(crate) fn entity_text(entity: &Entity) -> String {
    let mut text = format!("{} ({})", entity.label, entity.id);
    if let Some(description) = &entity.description {
        text.push('\n');
        text.push_str(description);
    }
    text
}

#[async_trait]
impl Handler for EntityHearsHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<Outcome> {
        let Some(id) = ctx.update.text().and_then(first_entity_id) else {
            return Ok(Outcome::Continue);
        };
        debug!(user_id = ctx.update.sender.id, entity_id = %id, "Entity mention heard");

        let reply = match ctx.resolver()?.lookup(&id).await? {
            Some(entity) => Reply::text(entity_text(&entity)),
            None => Reply::text(ctx.t("entity.not-found")),
        };
        Ok(Outcome::Reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_entity_ids() {
        assert_eq!(first_entity_id("Q42"), Some("Q42".to_string()));
        assert_eq!(first_entity_id("/Q42"), Some("Q42".to_string()));
        assert_eq!(first_entity_id("look at p31!"), Some("P31".to_string()));
        assert_eq!(
            first_entity_id("what about Q64, the city?"),
            Some("Q64".to_string())
        );
    }

    #[test]
    fn ignores_everything_else() {
        assert_eq!(first_entity_id("hello world"), None);
        assert_eq!(first_entity_id("/start language"), None);
        assert_eq!(first_entity_id("Q"), None);
        assert_eq!(first_entity_id("Q4x2"), None);
        assert_eq!(first_entity_id("Quiz42"), None);
    }
}
