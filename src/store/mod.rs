//! Storage abstraction for notes.
//!
//! The [`NoteStore`] trait is the document-store collaborator behind the
//! API: keyed find / insert / save / delete plus the two collection reads
//! the endpoints need. Backends:
//!
//! | Backend | Type | Use |
//! |---------|------|-----|
//! | `sqlite` | [`SqliteStore`] | durable storage via `sqlx` |
//! | `memory` | [`MemoryStore`] | ephemeral runs and tests |
//!
//! Each call is a single-row read or write; no operation spans more than
//! one note, so implementations need no transactions.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::models::Note;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a new note. The id must not already exist.
    async fn insert(&self, note: &Note) -> Result<()>;

    /// Look a note up by id.
    async fn find(&self, id: &str) -> Result<Option<Note>>;

    /// Overwrite the mutable fields (title, content, tags, pin) of an
    /// existing note. Returns `false` if the id no longer exists.
    async fn save(&self, note: &Note) -> Result<bool>;

    /// Remove a note. Returns `false` if nothing was removed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Every note, pinned first, insertion order within each group.
    async fn list_pinned_first(&self) -> Result<Vec<Note>>;

    /// Notes whose title or content contains `query`, ignoring case.
    async fn search(&self, query: &str) -> Result<Vec<Note>>;
}

/// Opens the backend selected by `[db].backend`.
///
/// The SQLite backend runs migrations before returning.
pub async fn open(config: &Config) -> Result<Arc<dyn NoteStore>> {
    match config.db.backend {
        Backend::Sqlite => {
            let store = SqliteStore::open(config).await?;
            tracing::info!(path = %config.db.path.display(), "using sqlite note store");
            Ok(Arc::new(store))
        }
        Backend::Memory => {
            tracing::info!("using in-memory note store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
