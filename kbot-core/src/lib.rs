//! # kbot-core
//!
//! Core types and traits for the knowledge-base bot: [`Update`], [`Session`], [`Context`],
//! the [`Handler`]/[`Middleware`] traits, structured errors, and tracing initialization.
//! Transport-agnostic; used by kbot-telegram and handler-pipeline.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{KbotError, PlatformError, Result};
pub use logger::init_tracing;
pub use types::{
    Button, ButtonAction, Context, Entity, EntityResolver, Handler, InlineResult, Location,
    Middleware, Outcome, Reply, Sender, Session, Translations, Update, UpdateKind,
};
