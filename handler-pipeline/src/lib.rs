//! # Handler pipeline
//!
//! Runs an ordered chain of middleware and handlers for each update. Middleware
//! `before` run in order (any false stops dispatch); handlers run until the
//! first one replies; middleware `after` run in reverse with the final outcome.

use kbot_core::{Context, Handler, Middleware, Outcome, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered dispatch pipeline. Services are passed in explicitly at build time;
/// there are no ambient singletons.
#[derive(Clone, Default)]
pub struct Pipeline {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Pipeline {
    /// Creates an empty pipeline (no middleware, no handlers).
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Appends a middleware (before in order, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler; the first handler that replies ends the handler phase.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Dispatches one update: middleware before, handlers until a reply,
    /// middleware after in reverse. Returns the final outcome.
    #[instrument(skip(self, ctx))]
    pub async fn dispatch(&self, ctx: &mut Context) -> Result<Outcome> {
        let mut final_outcome = Outcome::Continue;

        info!(
            user_id = ctx.update.sender.id,
            chat_id = ?ctx.update.chat_id,
            "step: pipeline started"
        );

        for mw in &self.middleware {
            let name = std::any::type_name_of_val(mw.as_ref());
            debug!(user_id = ctx.update.sender.id, middleware = %name, "step: middleware before");
            let should_continue = mw.before(ctx).await?;
            if !should_continue {
                info!(
                    user_id = ctx.update.sender.id,
                    middleware = %name,
                    "step: middleware before returned false, dispatch stopped"
                );
                return Ok(Outcome::Continue);
            }
        }

        for handler in &self.handlers {
            let name = std::any::type_name_of_val(handler.as_ref());
            debug!(user_id = ctx.update.sender.id, handler = %name, "step: handler processing");
            let outcome = handler.handle(ctx).await?;
            match outcome {
                Outcome::Reply(_) => {
                    info!(
                        user_id = ctx.update.sender.id,
                        handler = %name,
                        "step: pipeline stopped by handler reply"
                    );
                    final_outcome = outcome;
                    break;
                }
                Outcome::Continue => {}
            }
        }

        for mw in self.middleware.iter().rev() {
            let name = std::any::type_name_of_val(mw.as_ref());
            debug!(user_id = ctx.update.sender.id, middleware = %name, "step: middleware after");
            mw.after(ctx, &final_outcome).await?;
        }

        info!(
            user_id = ctx.update.sender.id,
            replied = matches!(final_outcome, Outcome::Reply(_)),
            "step: pipeline finished"
        );

        Ok(final_outcome)
    }
}

// Unit/integration tests live in tests/pipeline_test.rs
