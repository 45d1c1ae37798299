//! Core types: update, session, context, outcome, and the Handler/Middleware traits.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{KbotError, Result};

/// The user an update originated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
    /// Language hint supplied by the user's client, if any.
    pub language_code: Option<String>,
}

/// A geographic point carried by a message or stored in a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Routing payload of one inbound update.
#[derive(Debug, Clone)]
pub enum UpdateKind {
    Message {
        text: Option<String>,
        location: Option<Location>,
    },
    InlineQuery {
        id: String,
        query: String,
    },
    Callback {
        id: String,
        data: String,
    },
}

/// One inbound event from the chat platform, opaque beyond routing fields.
#[derive(Debug, Clone)]
pub struct Update {
    pub sender: Sender,
    pub chat_id: Option<i64>,
    pub kind: UpdateKind,
}

impl Update {
    /// Message text, if this update is a text message.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::Message { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Command token of a `/command` message, with any `@botname` suffix stripped.
    pub fn command(&self) -> Option<&str> {
        let rest = self.text()?.strip_prefix('/')?;
        let token = rest.split_whitespace().next()?;
        Some(token.split('@').next().unwrap_or(token))
    }

    /// Location attached to a message update.
    pub fn location(&self) -> Option<Location> {
        match &self.kind {
            UpdateKind::Message { location, .. } => *location,
            _ => None,
        }
    }

    /// Callback payload, if this update is a callback.
    pub fn callback_data(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::Callback { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Durable per-user state, keyed by sender id. Loaded before the pipeline
/// runs, mutable by any handler, flushed after the update completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Language chosen via the language menu; overrides the client hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Last location the user shared, kept for follow-up nearby searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location: Option<Location>,
}

/// A single inline-search result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineResult {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Message body sent to the chat when the user picks this result.
    pub text: String,
}

/// Action bound to a reply button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Start an inline query in the current chat, prefilled with the payload.
    SwitchInline(String),
    /// Open an external URL.
    Url(String),
    /// Send callback data back to the bot.
    Callback(String),
}

/// One button attached to a text reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn switch_inline(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::SwitchInline(query.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }
}

/// Transport-agnostic reply produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text message to the update's chat, with optional buttons (one per row).
    Text { text: String, buttons: Vec<Button> },
    /// Answer to an inline query.
    InlineResults {
        query_id: String,
        results: Vec<InlineResult>,
    },
    /// Acknowledgement of a callback, with optional notification text.
    CallbackAck {
        callback_id: String,
        text: Option<String>,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            buttons: Vec::new(),
        }
    }
}

/// Handler result for the pipeline: pass on, or stop with a final reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Reply(Reply),
}

/// Looks up structured entity data for a query term. The real backend is an
/// external collaborator; implementations are injected behind this seam.
#[async_trait]
pub trait EntityResolver: Send + Sync {
    /// Resolves one entity by id, `None` when unknown.
    async fn lookup(&self, id: &str) -> Result<Option<Entity>>;
    /// Full-text search over labels and descriptions.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Entity>>;
    /// Entities closest to the given point, nearest first.
    async fn nearby(&self, location: Location, limit: usize) -> Result<Vec<Entity>>;
}

/// One knowledge-base entity as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Localized string lookup for a resolved language.
pub trait Translations: Send + Sync {
    /// Translation for `key` in `lang`, falling back to the default language
    /// and finally to the key itself.
    fn translate(&self, lang: &str, key: &str) -> String;
    /// Language codes with a loaded catalog.
    fn languages(&self) -> Vec<String>;
    fn default_language(&self) -> &str;
}

/// Ephemeral per-update aggregate: the update, its session, the resolved
/// language, and handles attached by middleware. Owned by one pipeline
/// invocation and discarded afterwards.
pub struct Context {
    pub update: Update,
    pub session: Session,
    pub language: String,
    pub translations: Option<Arc<dyn Translations>>,
    pub resolver: Option<Arc<dyn EntityResolver>>,
    /// When the update was taken off the connection; read by the timing probe.
    pub received_at: Instant,
}

impl Context {
    pub fn new(update: Update) -> Self {
        Self {
            update,
            session: Session::default(),
            language: "en".to_string(),
            translations: None,
            resolver: None,
            received_at: Instant::now(),
        }
    }

    /// Localized string for `key` in the resolved language. Falls back to the
    /// key itself when no translations are attached.
    pub fn t(&self, key: &str) -> String {
        match &self.translations {
            Some(translations) => translations.translate(&self.language, key),
            None => key.to_string(),
        }
    }

    /// The knowledge-base handle; errors when no resolver middleware ran.
    pub fn resolver(&self) -> Result<Arc<dyn EntityResolver>> {
        self.resolver
            .clone()
            .ok_or_else(|| KbotError::Handler("no entity resolver attached to context".into()))
    }
}

/// Pipeline middleware: `before` runs ahead of the handlers (return false to
/// stop dispatch), `after` runs once the outcome is known, in reverse order.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _ctx: &mut Context) -> Result<bool> {
        Ok(true)
    }
    async fn after(&self, _ctx: &Context, _outcome: &Outcome) -> Result<()> {
        Ok(())
    }
}

/// Pipeline handler: read or mutate the context and either decline
/// (`Continue`) or terminate dispatch with a reply.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context) -> Result<Outcome>;
}
