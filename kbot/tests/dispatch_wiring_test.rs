//! Wiring tests for the assembled pipeline: command routing, language-menu
//! precedence, entity/inline/location handlers, and session persistence
//! across dispatch.

use std::sync::Arc;

use handler_pipeline::Pipeline;
use kbot::components::Components;
use kbot::{build_components, build_pipeline, AppConfig};
use kbot_core::{
    ButtonAction, Context, Entity, EntityResolver, Location, Outcome, Reply, Sender,
    Translations, Update, UpdateKind,
};
use kbot_locales::Locales;
use knowledge_base::InMemoryResolver;
use session_store::SessionStore;

fn test_translations() -> Arc<dyn Translations> {
    Arc::new(Locales::from_entries(
        "en",
        &[
            ("en", "help", "Send me an entity id or try inline search."),
            ("en", "menu.language.title", "Choose your language"),
            ("en", "menu.language.set", "Language saved"),
            ("en", "entity.not-found", "No such entity"),
            ("en", "inline.hint", "Type to search the knowledge base"),
            ("en", "location.nearby", "Nearby:"),
            ("en", "location.none", "Nothing nearby"),
            ("en", "location.help", "Share a location to search around it"),
            ("de", "help", "Schick mir eine Id."),
        ],
    ))
}

fn test_resolver() -> Arc<dyn EntityResolver> {
    let mut resolver = InMemoryResolver::new();
    resolver.insert(Entity {
        id: "Q42".to_string(),
        label: "Douglas Adams".to_string(),
        description: Some("English writer".to_string()),
        location: None,
    });
    resolver.insert(Entity {
        id: "Q64".to_string(),
        label: "Berlin".to_string(),
        description: Some("capital of Germany".to_string()),
        location: Some(Location {
            latitude: 52.52,
            longitude: 13.405,
        }),
    });
    Arc::new(resolver)
}

fn test_components(dir: &tempfile::TempDir) -> Components {
    Components {
        sessions: Arc::new(SessionStore::open(dir.path().join("sessions.json")).unwrap()),
        translations: test_translations(),
        resolver: test_resolver(),
    }
}

fn message(text: &str) -> Update {
    Update {
        sender: Sender {
            id: 123,
            username: Some("test_user".to_string()),
            language_code: None,
        },
        chat_id: Some(456),
        kind: UpdateKind::Message {
            text: Some(text.to_string()),
            location: None,
        },
    }
}

async fn dispatch(pipeline: &Pipeline, update: Update) -> Outcome {
    let mut ctx = Context::new(update);
    pipeline.dispatch(&mut ctx).await.unwrap()
}

/// `start`, `help`, and `search` each produce exactly one reply with the
/// localized help text and two buttons: inline-search trigger and a link.
#[tokio::test]
async fn help_commands_reply_with_two_buttons() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(&test_components(&dir), true);

    for command in ["/start", "/help", "/search"] {
        let outcome = dispatch(&pipeline, message(command)).await;
        let Outcome::Reply(Reply::Text { text, buttons }) = outcome else {
            panic!("{command} did not produce a text reply");
        };
        assert_eq!(text, "Send me an entity id or try inline search.");
        assert_eq!(buttons.len(), 2, "{command} should carry two buttons");
        assert!(matches!(buttons[0].action, ButtonAction::SwitchInline(_)));
        assert!(matches!(buttons[1].action, ButtonAction::Url(_)));
    }
}

/// The language-menu tokens and the literal `/start language` route to the
/// menu, never to the generic command handler.
#[tokio::test]
async fn language_menu_takes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(&test_components(&dir), true);

    for input in ["/lang", "/language", "/settings", "/start language"] {
        let outcome = dispatch(&pipeline, message(input)).await;
        let Outcome::Reply(Reply::Text { text, buttons }) = outcome else {
            panic!("{input} did not produce a text reply");
        };
        assert_eq!(text, "Choose your language", "{input} went to the wrong handler");
        assert!(
            buttons
                .iter()
                .all(|b| matches!(b.action, ButtonAction::Callback(_))),
            "{input} menu must be callback buttons"
        );
    }
}

/// Choosing a language from the menu acknowledges the callback and persists
/// the choice through the session store.
#[tokio::test]
async fn language_callback_persists_choice() {
    let dir = tempfile::tempdir().unwrap();
    let components = test_components(&dir);
    let sessions = components.sessions.clone();
    let pipeline = build_pipeline(&components, true);

    let update = Update {
        sender: Sender {
            id: 123,
            username: None,
            language_code: None,
        },
        chat_id: Some(456),
        kind: UpdateKind::Callback {
            id: "cb-1".to_string(),
            data: "lang:de".to_string(),
        },
    };
    let outcome = dispatch(&pipeline, update).await;

    let Outcome::Reply(Reply::CallbackAck { callback_id, text }) = outcome else {
        panic!("language callback was not acknowledged");
    };
    assert_eq!(callback_id, "cb-1");
    assert!(text.is_some());
    assert_eq!(sessions.get(123).language.as_deref(), Some("de"));

    // The stored choice now drives localization for the next update.
    let outcome = dispatch(&pipeline, message("/help")).await;
    let Outcome::Reply(Reply::Text { text, .. }) = outcome else {
        panic!("/help did not produce a text reply");
    };
    assert_eq!(text, "Schick mir eine Id.");
}

/// A callback naming a language without a loaded catalog is acknowledged but
/// never stored; localization stays on the resolved default.
#[tokio::test]
async fn unknown_language_callback_is_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let components = test_components(&dir);
    let sessions = components.sessions.clone();
    let pipeline = build_pipeline(&components, true);

    let update = Update {
        sender: Sender {
            id: 123,
            username: None,
            language_code: None,
        },
        chat_id: Some(456),
        kind: UpdateKind::Callback {
            id: "cb-2".to_string(),
            data: "lang:xx".to_string(),
        },
    };
    let outcome = dispatch(&pipeline, update).await;

    let Outcome::Reply(Reply::CallbackAck { callback_id, text }) = outcome else {
        panic!("callback was not acknowledged");
    };
    assert_eq!(callback_id, "cb-2");
    assert!(text.is_none());
    assert_eq!(sessions.get(123).language, None);

    let outcome = dispatch(&pipeline, message("/help")).await;
    let Outcome::Reply(Reply::Text { text, .. }) = outcome else {
        panic!("/help did not produce a text reply");
    };
    assert_eq!(text, "Send me an entity id or try inline search.");
}

/// Entity mentions are answered from the resolver; unknown ids get the
/// localized miss text; plain chatter falls through the whole chain.
#[tokio::test]
async fn entity_mentions_are_resolved() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(&test_components(&dir), true);

    let outcome = dispatch(&pipeline, message("tell me about Q42")).await;
    let Outcome::Reply(Reply::Text { text, .. }) = outcome else {
        panic!("entity mention did not produce a reply");
    };
    assert!(text.starts_with("Douglas Adams (Q42)"));
    assert!(text.contains("English writer"));

    let outcome = dispatch(&pipeline, message("Q999")).await;
    assert_eq!(
        outcome,
        Outcome::Reply(Reply::text("No such entity"))
    );

    let outcome = dispatch(&pipeline, message("hello there")).await;
    assert_eq!(outcome, Outcome::Continue);
}

/// Inline queries are always answered: hits for a term, a hint for an empty
/// query.
#[tokio::test]
async fn inline_queries_are_answered() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(&test_components(&dir), true);

    let inline = |query: &str| Update {
        sender: Sender {
            id: 123,
            username: None,
            language_code: None,
        },
        chat_id: None,
        kind: UpdateKind::InlineQuery {
            id: "iq-1".to_string(),
            query: query.to_string(),
        },
    };

    let outcome = dispatch(&pipeline, inline("berlin")).await;
    let Outcome::Reply(Reply::InlineResults { query_id, results }) = outcome else {
        panic!("inline query was not answered");
    };
    assert_eq!(query_id, "iq-1");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Berlin");

    let outcome = dispatch(&pipeline, inline("  ")).await;
    let Outcome::Reply(Reply::InlineResults { results, .. }) = outcome else {
        panic!("empty inline query was not answered");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Type to search the knowledge base");
}

/// A shared location is answered with nearby entities and remembered in the
/// session.
#[tokio::test]
async fn locations_search_nearby_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let components = test_components(&dir);
    let sessions = components.sessions.clone();
    let pipeline = build_pipeline(&components, true);

    let update = Update {
        sender: Sender {
            id: 123,
            username: None,
            language_code: None,
        },
        chat_id: Some(456),
        kind: UpdateKind::Message {
            text: None,
            location: Some(Location {
                latitude: 52.5,
                longitude: 13.4,
            }),
        },
    };
    let outcome = dispatch(&pipeline, update).await;

    let Outcome::Reply(Reply::Text { text, .. }) = outcome else {
        panic!("location message did not produce a reply");
    };
    assert!(text.starts_with("Nearby:"));
    assert!(text.contains("Berlin (Q64)"));
    assert!(sessions.get(123).last_location.is_some());
}

/// Startup fails before any update loop when the resource catalog is missing.
#[test]
fn startup_aborts_without_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("locales")).unwrap();
    std::fs::write(dir.path().join("locales/en.yaml"), "help: Help!\n").unwrap();

    let config = AppConfig {
        production: true,
        log_file: dir.path().join("kbot.log").display().to_string(),
        session_file: dir.path().join("sessions.json"),
        locales_dir: dir.path().join("locales"),
        catalog_file: dir.path().join("missing-catalog.yaml"),
        entities_file: None,
        default_language: "en".to_string(),
        token: None,
    };
    assert!(build_components(&config).is_err());

    // With the catalog in place the same config builds.
    std::fs::write(&config.catalog_file, "menu:\n  language: Q315\n").unwrap();
    assert!(build_components(&config).is_ok());
}
