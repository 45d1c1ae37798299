use std::sync::Arc;

use async_trait::async_trait;
use kbot_core::{Context, KbotError, Middleware, Outcome, Result};
use session_store::SessionStore;
use tracing::{debug, instrument};

/// Loads the sender's session before dispatch and flushes it afterwards.
/// Runs first so every later middleware and handler sees the loaded state.
pub struct SessionMiddleware {
    store: Arc<SessionStore>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Middleware for SessionMiddleware {
    #[instrument(skip(self, ctx))]
    async fn before(&self, ctx: &mut Context) -> Result<bool> {
        ctx.session = self.store.get(ctx.update.sender.id);
        debug!(
            user_id = ctx.update.sender.id,
            language = ?ctx.session.language,
            "Session loaded"
        );
        Ok(true)
    }

    #[instrument(skip(self, ctx, _outcome))]
    async fn after(&self, ctx: &Context, _outcome: &Outcome) -> Result<()> {
        self.store
            .put(ctx.update.sender.id, ctx.session.clone())
            .map_err(|e| KbotError::Store(e.to_string()))?;
        debug!(user_id = ctx.update.sender.id, "Session flushed");
        Ok(())
    }
}
