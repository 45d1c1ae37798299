use std::sync::Arc;

use async_trait::async_trait;
use kbot_core::{Context, Middleware, Result, Translations};
use tracing::{debug, instrument};

/// Resolves the update's language and attaches the translation catalog.
/// Precedence: session choice, then the client's language hint, then the
/// catalog's default language. Must run after [`super::SessionMiddleware`].
pub struct LocaleMiddleware {
    translations: Arc<dyn Translations>,
}

impl LocaleMiddleware {
    pub fn new(translations: Arc<dyn Translations>) -> Self {
        Self { translations }
    }
}

#[async_trait]
impl Middleware for LocaleMiddleware {
    #[instrument(skip(self, ctx))]
    async fn before(&self, ctx: &mut Context) -> Result<bool> {
        let language = ctx
            .session
            .language
            .clone()
            .or_else(|| ctx.update.sender.language_code.clone())
            .unwrap_or_else(|| self.translations.default_language().to_string());
        debug!(user_id = ctx.update.sender.id, language = %language, "Language resolved");
        ctx.language = language;
        ctx.translations = Some(self.translations.clone());
        Ok(true)
    }
}
