//! Inline search: answers inline queries with resolver hits. Terminal for
//! every inline-query update; other updates pass through.

use async_trait::async_trait;
use kbot_core::{Context, Handler, InlineResult, Outcome, Reply, Result, UpdateKind};
use tracing::debug;

use super::entity_hears::entity_text;

const RESULT_LIMIT: usize = 10;

pub struct InlineSearchHandler;

#[async_trait]
impl Handler for InlineSearchHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<Outcome> {
        let UpdateKind::InlineQuery { id, query } = &ctx.update.kind else {
            return Ok(Outcome::Continue);
        };
        let query_id = id.clone();
        let query = query.trim().to_string();
        debug!(user_id = ctx.update.sender.id, query = %query, "Inline search");

        let results = if query.is_empty() {
            vec![InlineResult {
                id: "hint".to_string(),
                title: ctx.t("inline.hint"),
                description: None,
                text: ctx.t("inline.hint"),
            }]
        } else {
            ctx.resolver()?
                .search(&query, RESULT_LIMIT)
                .await?
                .iter()
                .map(|entity| InlineResult {
                    id: entity.id.clone(),
                    title: entity.label.clone(),
                    description: entity.description.clone(),
                    text: entity_text(entity),
                })
                .collect()
        };

        Ok(Outcome::Reply(Reply::InlineResults { query_id, results }))
    }
}
