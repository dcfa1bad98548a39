//! In-memory [`NoteStore`] implementation for tests and throwaway servers.
//!
//! Notes live in a `Vec` behind `std::sync::RwLock`, so insertion order is
//! the vector order.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::models::Note;

use super::NoteStore;

pub struct MemoryStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Note>>> {
        self.notes.read().map_err(|_| anyhow!("note store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Note>>> {
        self.notes.write().map_err(|_| anyhow!("note store lock poisoned"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert(&self, note: &Note) -> Result<()> {
        let mut notes = self.write()?;
        if notes.iter().any(|n| n.id == note.id) {
            bail!("duplicate note id: {}", note.id);
        }
        notes.push(note.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Note>> {
        Ok(self.read()?.iter().find(|n| n.id == id).cloned())
    }

    async fn save(&self, note: &Note) -> Result<bool> {
        let mut notes = self.write()?;
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(stored) => {
                stored.title = note.title.clone();
                stored.content = note.content.clone();
                stored.tags = note.tags.clone();
                stored.is_pinned = note.is_pinned;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut notes = self.write()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        Ok(notes.len() != before)
    }

    async fn list_pinned_first(&self) -> Result<Vec<Note>> {
        let mut notes = self.read()?.clone();
        // stable: insertion order survives within each group
        notes.sort_by_key(|n| !n.is_pinned);
        Ok(notes)
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        Ok(self
            .read()?
            .iter()
            .filter(|n| n.matches(query))
            .cloned()
            .collect())
    }
}
