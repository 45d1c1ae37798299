//! Pipeline assembly in the fixed dispatch order. Session and language are
//! resolved before anything personalizes output; the resolver is attached
//! before any handler that looks up entities; the language menu registers
//! ahead of the generic commands so its command tokens take precedence.

use std::sync::Arc;

use handler_pipeline::Pipeline;
use kbot_middleware::{
    LocaleMiddleware, ResolverMiddleware, SessionMiddleware, TimingMiddleware,
};

use crate::components::Components;
use crate::handlers::{
    EntityHearsHandler, HelpHandler, InlineSearchHandler, LanguageMenuHandler,
    LocationSearchHandler,
};

/// Builds the dispatch pipeline. The timing probe is registered only outside
/// production.
pub fn build_pipeline(components: &Components, production: bool) -> Pipeline {
    let mut pipeline = Pipeline::new()
        .add_middleware(Arc::new(SessionMiddleware::new(components.sessions.clone())))
        .add_middleware(Arc::new(LocaleMiddleware::new(
            components.translations.clone(),
        )))
        .add_middleware(Arc::new(ResolverMiddleware::new(
            components.resolver.clone(),
        )));

    if !production {
        pipeline = pipeline.add_middleware(Arc::new(TimingMiddleware));
    }

    pipeline
        .add_handler(Arc::new(EntityHearsHandler))
        .add_handler(Arc::new(InlineSearchHandler))
        .add_handler(Arc::new(LocationSearchHandler))
        .add_handler(Arc::new(LanguageMenuHandler))
        .add_handler(Arc::new(HelpHandler))
}
