//! # session-store
//!
//! File-backed session persistence keyed by sender id. The whole store is one
//! pretty-printed (tab-indented) JSON object read at startup; every flush
//! rewrites the file with a trailing newline. Writes are blocking and have no
//! transaction semantics.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kbot_core::Session;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Sessions for all users, held in memory and mirrored to one JSON file.
/// The dispatch model serializes updates, so a plain mutex suffices.
pub struct SessionStore {
    path: PathBuf,
    sessions: Mutex<BTreeMap<i64, Session>>,
}

impl SessionStore {
    /// Opens the store at `path`, reading any existing session file. A missing
    /// file is an empty store; a malformed file is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let sessions = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let map: BTreeMap<i64, Session> = serde_json::from_str(&raw)?;
            info!(path = %path.display(), users = map.len(), "Loaded session file");
            map
        } else {
            info!(path = %path.display(), "No session file yet, starting empty");
            BTreeMap::new()
        };
        Ok(Self {
            path,
            sessions: Mutex::new(sessions),
        })
    }

    /// Session for `sender_id`, default when the user is new.
    pub fn get(&self, sender_id: i64) -> Session {
        self.sessions
            .lock()
            .unwrap()
            .get(&sender_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Stores the session for `sender_id` and rewrites the file.
    pub fn put(&self, sender_id: i64, session: Session) -> Result<()> {
        let snapshot = {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.insert(sender_id, session);
            sessions.clone()
        };
        self.write_all(&snapshot)?;
        debug!(sender_id, path = %self.path.display(), "Session flushed");
        Ok(())
    }

    /// Number of users with a stored session.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_all(&self, sessions: &BTreeMap<i64, Session>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        sessions.serialize(&mut ser)?;
        buf.push(b'\n');
        std::fs::write(&self.path, &buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbot_core::Location;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("sessions.json")).unwrap()
    }

    #[test]
    fn unknown_sender_gets_default_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get(42), Session::default());
        assert!(store.is_empty());
    }

    #[test]
    fn put_then_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        let session = Session {
            language: Some("de".to_string()),
            last_location: Some(Location {
                latitude: 48.2,
                longitude: 16.37,
            }),
        };

        let store = SessionStore::open(&path).unwrap();
        store.put(7, session.clone()).unwrap();
        drop(store);

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(7), session);
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn file_is_tab_indented_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        let store = SessionStore::open(&path).unwrap();
        store
            .put(
                7,
                Session {
                    language: Some("en".to_string()),
                    last_location: None,
                },
            )
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with('\n'));
        assert!(raw.contains("\n\t\"7\""));
        // Valid JSON that parses back to the same map.
        let map: BTreeMap<i64, Session> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.get(&7).unwrap().language.as_deref(), Some("en"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SessionStore::open(&path).is_err());
    }

    #[test]
    fn put_overwrites_existing_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .put(
                1,
                Session {
                    language: Some("en".to_string()),
                    last_location: None,
                },
            )
            .unwrap();
        store
            .put(
                1,
                Session {
                    language: Some("es".to_string()),
                    last_location: None,
                },
            )
            .unwrap();
        assert_eq!(store.get(1).language.as_deref(), Some("es"));
        assert_eq!(store.len(), 1);
    }
}
