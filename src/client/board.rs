//! Client-side note board state.
//!
//! A [`Board`] mirrors the server's note list and never patches it
//! locally: after any successful mutation it shows a toast and reloads the
//! whole list. Failed calls are logged, leave the list as it was, and are
//! handed back to the caller.

use std::time::{Duration, Instant};

use crate::models::{NewNote, Note, NoteChanges};

use super::api::{ClientError, NotesApi};

/// How long a toast stays visible before [`ToastState::expire`] hides it.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit,
}

/// The add/edit dialog: whether it is open, in which mode, and which note
/// it edits.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub shown: bool,
    pub mode: ModalMode,
    pub target: Option<Note>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            shown: false,
            mode: ModalMode::Add,
            target: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Add,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastState {
    pub shown: bool,
    pub message: String,
    pub kind: ToastKind,
    shown_at: Option<Instant>,
}

impl Default for ToastState {
    fn default() -> Self {
        Self {
            shown: false,
            message: String::new(),
            kind: ToastKind::Add,
            shown_at: None,
        }
    }
}

impl ToastState {
    fn show(&mut self, message: &str, kind: ToastKind) {
        self.shown = true;
        self.message = message.to_string();
        self.kind = kind;
        self.shown_at = Some(Instant::now());
    }

    pub fn hide(&mut self) {
        self.shown = false;
        self.message.clear();
        self.shown_at = None;
    }

    /// Hides the toast once [`TOAST_TTL`] has passed. Returns `true` if it
    /// was hidden by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(at) if self.shown && now.saturating_duration_since(at) >= TOAST_TTL => {
                self.hide();
                true
            }
            _ => false,
        }
    }
}

/// What to show when the list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoNotes,
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoNotes => {
                "Start creating your first note! Click the 'Add' button to jot down your \
                 thoughts, ideas, and reminders. Let's get started!"
            }
            Self::NoMatches => "Oops! No notes found matching your search.",
        }
    }
}

pub struct Board<A> {
    api: A,
    notes: Vec<Note>,
    modal: ModalState,
    toast: ToastState,
    is_search: bool,
}

impl<A: NotesApi> Board<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
            modal: ModalState::default(),
            toast: ToastState::default(),
            is_search: false,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn toast(&self) -> &ToastState {
        &self.toast
    }

    /// Hides the toast if it has outlived [`TOAST_TTL`].
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        self.toast.expire(now)
    }

    pub fn is_search(&self) -> bool {
        self.is_search
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// `None` while there are notes to show.
    pub fn empty_state(&self) -> Option<EmptyState> {
        match (self.notes.is_empty(), self.is_search) {
            (false, _) => None,
            (true, true) => Some(EmptyState::NoMatches),
            (true, false) => Some(EmptyState::NoNotes),
        }
    }

    /// Fetches the full list, replacing whatever is loaded.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.api.get_all_notes().await {
            Ok(notes) => {
                self.notes = notes;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load notes");
                Err(e)
            }
        }
    }

    /// Reload after a mutation. A failed reload leaves the list stale.
    async fn refresh(&mut self) {
        let _ = self.load().await;
    }

    pub fn open_add(&mut self) {
        self.modal = ModalState {
            shown: true,
            mode: ModalMode::Add,
            target: None,
        };
    }

    pub fn open_edit(&mut self, note: Note) {
        self.modal = ModalState {
            shown: true,
            mode: ModalMode::Edit,
            target: Some(note),
        };
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::default();
    }

    pub fn close_toast(&mut self) {
        self.toast.hide();
    }

    pub async fn submit_add(&mut self, input: NewNote) -> Result<Note, ClientError> {
        let note = self
            .api
            .add_note(&input)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to add note"))?;
        self.toast.show("Note Added Successfully", ToastKind::Add);
        self.close_modal();
        self.refresh().await;
        Ok(note)
    }

    /// Submits changes for the note currently open in the edit modal.
    pub async fn submit_edit(&mut self, changes: NoteChanges) -> Result<Note, ClientError> {
        let id = match (&self.modal.mode, &self.modal.target) {
            (ModalMode::Edit, Some(target)) if self.modal.shown => target.id.clone(),
            _ => return Err(ClientError::NoEditTarget),
        };
        let note = self
            .api
            .edit_note(&id, &changes)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id = %id, "failed to edit note"))?;
        self.toast.show("Note Updated Successfully", ToastKind::Edit);
        self.close_modal();
        self.refresh().await;
        Ok(note)
    }

    pub async fn delete_note(&mut self, note: &Note) -> Result<(), ClientError> {
        self.api
            .delete_note(&note.id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id = %note.id, "failed to delete note"))?;
        self.toast.show("Note Deleted Successfully", ToastKind::Delete);
        self.refresh().await;
        Ok(())
    }

    /// Flips the pin flag of `note` as the board last saw it.
    pub async fn toggle_pin(&mut self, note: &Note) -> Result<Note, ClientError> {
        let updated = self
            .api
            .update_note_pinned(&note.id, !note.is_pinned)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, id = %note.id, "failed to update pin"))?;
        self.toast.show("Note Updated Successfully", ToastKind::Edit);
        self.refresh().await;
        Ok(updated)
    }

    /// Replaces the list with search results and marks search as active.
    pub async fn search(&mut self, query: &str) -> Result<(), ClientError> {
        let notes = self
            .api
            .search_notes(query)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "search failed"))?;
        self.is_search = true;
        self.notes = notes;
        Ok(())
    }

    pub async fn clear_search(&mut self) -> Result<(), ClientError> {
        self.is_search = false;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::error::NoteError;
    use crate::models::PinUpdate;
    use crate::notes::NoteService;
    use crate::store::MemoryStore;

    /// Calls the service in-process and counts list fetches.
    struct LocalApi {
        service: NoteService,
        loads: AtomicUsize,
    }

    impl LocalApi {
        fn new() -> Self {
            Self {
                service: NoteService::new(Arc::new(MemoryStore::new())),
                loads: AtomicUsize::new(0),
            }
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    fn to_client(e: NoteError) -> ClientError {
        ClientError::Api {
            status: e.status().as_u16(),
            message: e.to_string(),
        }
    }

    #[async_trait]
    impl NotesApi for LocalApi {
        async fn get_all_notes(&self) -> Result<Vec<Note>, ClientError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.service.list().await.map_err(to_client)
        }

        async fn add_note(&self, input: &NewNote) -> Result<Note, ClientError> {
            self.service.create(input.clone()).await.map_err(to_client)
        }

        async fn edit_note(&self, id: &str, changes: &NoteChanges) -> Result<Note, ClientError> {
            self.service.edit(id, changes.clone()).await.map_err(to_client)
        }

        async fn delete_note(&self, id: &str) -> Result<(), ClientError> {
            self.service.delete(id).await.map_err(to_client)
        }

        async fn update_note_pinned(&self, id: &str, is_pinned: bool) -> Result<Note, ClientError> {
            let update = PinUpdate {
                is_pinned: Some(is_pinned),
            };
            self.service.set_pinned(id, update).await.map_err(to_client)
        }

        async fn search_notes(&self, query: &str) -> Result<Vec<Note>, ClientError> {
            self.service
                .search(Some(query.to_string()))
                .await
                .map_err(to_client)
        }
    }

    fn input(title: &str, content: &str) -> NewNote {
        NewNote {
            title: Some(title.into()),
            content: Some(content.into()),
            tags: None,
        }
    }

    #[tokio::test]
    async fn empty_board_shows_first_note_prompt() {
        let mut board = Board::new(LocalApi::new());
        board.load().await.unwrap();
        assert_eq!(board.empty_state(), Some(EmptyState::NoNotes));
        assert_eq!(board.api().loads(), 1);
    }

    #[tokio::test]
    async fn add_closes_modal_toasts_and_reloads() {
        let mut board = Board::new(LocalApi::new());
        board.load().await.unwrap();
        board.open_add();
        assert!(board.modal().shown);

        board.submit_add(input("A", "B")).await.unwrap();

        assert!(!board.modal().shown);
        assert!(board.toast().shown);
        assert_eq!(board.toast().kind, ToastKind::Add);
        assert_eq!(board.notes().len(), 1);
        assert_eq!(board.api().loads(), 2);
        assert_eq!(board.empty_state(), None);
    }

    #[tokio::test]
    async fn failed_add_keeps_modal_and_list() {
        let mut board = Board::new(LocalApi::new());
        board.load().await.unwrap();
        board.open_add();

        let err = board.submit_add(input("", "B")).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(board.modal().shown);
        assert!(!board.toast().shown);
        assert!(board.notes().is_empty());
        assert_eq!(board.api().loads(), 1);
    }

    #[tokio::test]
    async fn edit_requires_open_target() {
        let mut board = Board::new(LocalApi::new());
        let changes = NoteChanges {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(matches!(
            board.submit_edit(changes).await.unwrap_err(),
            ClientError::NoEditTarget
        ));
    }

    #[tokio::test]
    async fn edit_updates_target_and_reloads() {
        let mut board = Board::new(LocalApi::new());
        let note = board.submit_add(input("A", "B")).await.unwrap();

        board.open_edit(note.clone());
        assert_eq!(board.modal().mode, ModalMode::Edit);
        let changes = NoteChanges {
            title: Some("A2".into()),
            ..Default::default()
        };
        board.submit_edit(changes).await.unwrap();

        assert_eq!(board.find(&note.id).unwrap().title, "A2");
        assert_eq!(board.toast().kind, ToastKind::Edit);
        assert_eq!(board.modal(), &ModalState::default());
    }

    #[tokio::test]
    async fn toggle_pin_moves_note_first() {
        let mut board = Board::new(LocalApi::new());
        board.submit_add(input("first", "x")).await.unwrap();
        let second = board.submit_add(input("second", "x")).await.unwrap();

        let updated = board.toggle_pin(&second).await.unwrap();
        assert!(updated.is_pinned);
        assert_eq!(board.notes()[0].id, second.id);

        let pinned = board.find(&second.id).cloned().unwrap();
        board.toggle_pin(&pinned).await.unwrap();
        assert!(!board.find(&second.id).unwrap().is_pinned);
    }

    #[tokio::test]
    async fn delete_toasts_and_empties_list() {
        let mut board = Board::new(LocalApi::new());
        let note = board.submit_add(input("A", "B")).await.unwrap();
        board.delete_note(&note).await.unwrap();
        assert_eq!(board.toast().kind, ToastKind::Delete);
        assert!(board.notes().is_empty());

        let loads = board.api().loads();
        assert_eq!(board.delete_note(&note).await.unwrap_err().status(), Some(404));
        assert_eq!(board.api().loads(), loads);
    }

    #[tokio::test]
    async fn search_then_clear() {
        let mut board = Board::new(LocalApi::new());
        board.submit_add(input("Hello World", "x")).await.unwrap();
        board.submit_add(input("other", "y")).await.unwrap();

        board.search("hello").await.unwrap();
        assert!(board.is_search());
        assert_eq!(board.notes().len(), 1);

        board.search("nothing-like-this").await.unwrap();
        assert_eq!(board.empty_state(), Some(EmptyState::NoMatches));

        board.clear_search().await.unwrap();
        assert!(!board.is_search());
        assert_eq!(board.notes().len(), 2);
    }

    #[tokio::test]
    async fn board_toast_auto_clears() {
        let mut board = Board::new(LocalApi::new());
        board.submit_add(input("A", "B")).await.unwrap();
        assert!(board.toast().shown);
        assert!(!board.expire_toast(Instant::now()));
        assert!(board.expire_toast(Instant::now() + TOAST_TTL));
        assert!(!board.toast().shown);
    }

    #[test]
    fn toast_expires_after_ttl() {
        let mut toast = ToastState::default();
        toast.show("Note Added Successfully", ToastKind::Add);
        let shown_at = toast.shown_at.unwrap();

        assert!(!toast.expire(shown_at + Duration::from_secs(1)));
        assert!(toast.shown);
        assert!(toast.expire(shown_at + TOAST_TTL));
        assert!(!toast.shown);
        assert!(toast.message.is_empty());
    }
}
