//! Unit tests for LocaleMiddleware: language precedence and catalog attachment.

use std::sync::Arc;

use kbot_core::Middleware;
use kbot_locales::Locales;

use crate::test::message_context;
use crate::LocaleMiddleware;

fn catalog() -> Arc<Locales> {
    Arc::new(Locales::from_entries(
        "en",
        &[("en", "help", "Help!"), ("de", "help", "Hilfe!")],
    ))
}

/// A language chosen in the session beats the client hint.
#[tokio::test]
async fn session_language_wins() {
    let middleware = LocaleMiddleware::new(catalog());
    let mut ctx = message_context(1, Some("en"), "hi");
    ctx.session.language = Some("de".to_string());

    middleware.before(&mut ctx).await.unwrap();
    assert_eq!(ctx.language, "de");
    assert_eq!(ctx.t("help"), "Hilfe!");
}

/// Without a session choice, the client's language hint is used.
#[tokio::test]
async fn client_hint_is_second() {
    let middleware = LocaleMiddleware::new(catalog());
    let mut ctx = message_context(1, Some("de"), "hi");
    middleware.before(&mut ctx).await.unwrap();
    assert_eq!(ctx.language, "de");
}

/// With neither, the catalog default applies.
#[tokio::test]
async fn default_language_is_last() {
    let middleware = LocaleMiddleware::new(catalog());
    let mut ctx = message_context(1, None, "hi");
    middleware.before(&mut ctx).await.unwrap();
    assert_eq!(ctx.language, "en");
    assert_eq!(ctx.t("help"), "Help!");
}
