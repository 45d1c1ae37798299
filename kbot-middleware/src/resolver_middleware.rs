use std::sync::Arc;

use async_trait::async_trait;
use kbot_core::{Context, EntityResolver, Middleware, Result};

/// Attaches the knowledge-base resolver handle to the context so entity
/// handlers can query it. Runs before any handler that looks up entities.
pub struct ResolverMiddleware {
    resolver: Arc<dyn EntityResolver>,
}

impl ResolverMiddleware {
    pub fn new(resolver: Arc<dyn EntityResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Middleware for ResolverMiddleware {
    async fn before(&self, ctx: &mut Context) -> Result<bool> {
        ctx.resolver = Some(self.resolver.clone());
        Ok(true)
    }
}
