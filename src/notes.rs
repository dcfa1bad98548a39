//! Note operations behind the HTTP endpoints.
//!
//! [`NoteService`] validates input before touching the store, checks that
//! an id exists before mutating it, and turns every store failure into
//! [`NoteError::Internal`]. It holds no state of its own.

use std::sync::Arc;

use crate::error::{NoteError, Result};
use crate::models::{NewNote, Note, NoteChanges, PinUpdate};
use crate::store::NoteStore;

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewNote) -> Result<Note> {
        let title =
            non_empty(input.title).ok_or_else(|| NoteError::validation("Title is required"))?;
        let content =
            non_empty(input.content).ok_or_else(|| NoteError::validation("Content is required"))?;

        let note = Note::new(title, content, input.tags.unwrap_or_default());
        self.store.insert(&note).await?;
        tracing::debug!(id = %note.id, "note created");
        Ok(note)
    }

    /// Partial update. A pin-only body is rejected before the id is looked up.
    pub async fn edit(&self, id: &str, changes: NoteChanges) -> Result<Note> {
        if !changes.has_changes() {
            return Err(NoteError::validation("No changes provided"));
        }

        let mut note = self.find_existing(id).await?;
        changes.apply(&mut note);
        self.save_existing(&note).await?;
        tracing::debug!(id, "note edited");
        Ok(note)
    }

    pub async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.store.list_pinned_first().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.find_existing(id).await?;
        if !self.store.delete(id).await? {
            // removed by a concurrent request between the read and the delete
            return Err(NoteError::not_found());
        }
        tracing::debug!(id, "note deleted");
        Ok(())
    }

    /// Overwrites the pin flag only. An absent flag unpins.
    pub async fn set_pinned(&self, id: &str, update: PinUpdate) -> Result<Note> {
        let mut note = self.find_existing(id).await?;
        note.is_pinned = update.is_pinned.unwrap_or(false);
        self.save_existing(&note).await?;
        tracing::debug!(id, pinned = note.is_pinned, "note pin updated");
        Ok(note)
    }

    pub async fn search(&self, query: Option<String>) -> Result<Vec<Note>> {
        let query =
            non_empty(query).ok_or_else(|| NoteError::validation("Search query is required"))?;
        Ok(self.store.search(&query).await?)
    }

    async fn find_existing(&self, id: &str) -> Result<Note> {
        self.store.find(id).await?.ok_or_else(NoteError::not_found)
    }

    async fn save_existing(&self, note: &Note) -> Result<()> {
        if self.store.save(note).await? {
            Ok(())
        } else {
            Err(NoteError::not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> NoteService {
        NoteService::new(Arc::new(MemoryStore::new()))
    }

    fn new_note(title: &str, content: &str) -> NewNote {
        NewNote {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            tags: None,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let svc = service();
        let note = svc.create(new_note("A", "B")).await.unwrap();
        assert!(note.tags.is_empty());
        assert!(!note.is_pinned);
        assert_eq!(svc.list().await.unwrap(), vec![note]);
    }

    #[tokio::test]
    async fn create_requires_title_then_content() {
        let svc = service();
        let err = svc.create(new_note("", "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Title is required");

        let err = svc.create(new_note("A", "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Content is required");

        let err = svc.create(NewNote::default()).await.unwrap_err();
        assert!(matches!(err, NoteError::Validation(_)));

        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_checks_changes_before_existence() {
        let svc = service();
        let pin_only = NoteChanges {
            is_pinned: Some(true),
            ..Default::default()
        };
        let err = svc.edit("missing", pin_only).await.unwrap_err();
        assert!(matches!(err, NoteError::Validation(_)));

        let with_title = NoteChanges {
            title: Some("x".into()),
            ..Default::default()
        };
        let err = svc.edit("missing", with_title).await.unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn edit_applies_only_provided_fields() {
        let svc = service();
        let note = svc
            .create(NewNote {
                tags: Some(vec!["t".into()]),
                ..new_note("A", "B")
            })
            .await
            .unwrap();

        let edited = svc
            .edit(
                &note.id,
                NoteChanges {
                    content: Some("C".into()),
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.title, "A");
        assert_eq!(edited.content, "C");
        assert_eq!(edited.tags, vec!["t"]);
        assert_eq!(edited.created_on, note.created_on);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let svc = service();
        let note = svc.create(new_note("A", "B")).await.unwrap();
        svc.delete(&note.id).await.unwrap();
        assert!(matches!(
            svc.delete(&note.id).await.unwrap_err(),
            NoteError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn set_pinned_overwrites_flag() {
        let svc = service();
        let note = svc.create(new_note("A", "B")).await.unwrap();

        let pinned = svc
            .set_pinned(&note.id, PinUpdate { is_pinned: Some(true) })
            .await
            .unwrap();
        assert!(pinned.is_pinned);

        let unpinned = svc
            .set_pinned(&note.id, PinUpdate::default())
            .await
            .unwrap();
        assert!(!unpinned.is_pinned);

        assert!(matches!(
            svc.set_pinned("missing", PinUpdate::default()).await.unwrap_err(),
            NoteError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn search_requires_query() {
        let svc = service();
        svc.create(new_note("Hello World", "x")).await.unwrap();
        assert!(matches!(
            svc.search(None).await.unwrap_err(),
            NoteError::Validation(_)
        ));
        assert!(matches!(
            svc.search(Some(String::new())).await.unwrap_err(),
            NoteError::Validation(_)
        ));
        assert_eq!(svc.search(Some("hello".into())).await.unwrap().len(), 1);
    }
}
