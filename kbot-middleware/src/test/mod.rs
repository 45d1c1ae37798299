//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.
//! Tests interact with middleware via their public APIs.

mod locale_middleware_test;

use kbot_core::{Context, Sender, Update, UpdateKind};

pub(crate) fn message_context(sender_id: i64, language_code: Option<&str>, text: &str) -> Context {
    Context::new(Update {
        sender: Sender {
            id: sender_id,
            username: Some("test_user".to_string()),
            language_code: language_code.map(str::to_string),
        },
        chat_id: Some(456),
        kind: UpdateKind::Message {
            text: Some(text.to_string()),
            location: None,
        },
    })
}
