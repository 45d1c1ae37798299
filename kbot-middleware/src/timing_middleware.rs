use async_trait::async_trait;
use kbot_core::{Context, Middleware, Outcome, Result, UpdateKind};
use tracing::{info, instrument};

/// Per-update timing diagnostic, registered only outside production.
/// Logs the update kind and how long dispatch took once the outcome is known.
pub struct TimingMiddleware;

fn kind_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::Message { location: Some(_), .. } => "location",
        UpdateKind::Message { .. } => "message",
        UpdateKind::InlineQuery { .. } => "inline_query",
        UpdateKind::Callback { .. } => "callback",
    }
}

#[async_trait]
impl Middleware for TimingMiddleware {
    #[instrument(skip(self, ctx, outcome))]
    async fn after(&self, ctx: &Context, outcome: &Outcome) -> Result<()> {
        info!(
            user_id = ctx.update.sender.id,
            kind = kind_name(&ctx.update.kind),
            replied = matches!(outcome, Outcome::Reply(_)),
            elapsed_ms = ctx.received_at.elapsed().as_millis() as u64,
            "Update handled"
        );
        Ok(())
    }
}
