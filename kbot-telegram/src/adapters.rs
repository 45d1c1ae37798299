//! Conversion from teloxide update types to core [`Update`].
//! Depends only on teloxide and kbot_core type definitions.

use kbot_core::{Location, Sender, Update, UpdateKind};
use teloxide::types::UpdateKind as TgUpdateKind;

fn sender_from(user: &teloxide::types::User) -> Sender {
    Sender {
        id: user.id.0 as i64,
        username: user.username.clone(),
        language_code: user.language_code.clone(),
    }
}

fn location_from(location: &teloxide::types::Location) -> Location {
    Location {
        latitude: location.latitude,
        longitude: location.longitude,
    }
}

/// Maps a teloxide update to a core update. Returns `None` for update kinds
/// the pipeline does not route (edits, polls, …) and for anonymous messages.
pub fn to_core_update(update: &teloxide::types::Update) -> Option<Update> {
    match &update.kind {
        TgUpdateKind::Message(msg) => {
            let from = msg.from.as_ref()?;
            Some(Update {
                sender: sender_from(from),
                chat_id: Some(msg.chat.id.0),
                kind: UpdateKind::Message {
                    text: msg.text().map(str::to_string),
                    location: msg.location().map(location_from),
                },
            })
        }
        TgUpdateKind::InlineQuery(query) => Some(Update {
            sender: sender_from(&query.from),
            chat_id: None,
            kind: UpdateKind::InlineQuery {
                // Query ids are newtypes on the wire; core carries plain strings.
                id: query.id.to_string(),
                query: query.query.clone(),
            },
        }),
        TgUpdateKind::CallbackQuery(query) => {
            let data = query.data.clone()?;
            Some(Update {
                sender: sender_from(&query.from),
                chat_id: query.message.as_ref().map(|m| m.chat().id.0),
                kind: UpdateKind::Callback {
                    id: query.id.to_string(),
                    data,
                },
            })
        }
        _ => None,
    }
}
