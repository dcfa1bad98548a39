//! Client side of the notes API.
//!
//! [`NotesClient`] speaks the HTTP contract; [`Board`] is the state a note
//! board keeps between calls (the loaded list, the add/edit modal, the
//! toast and the search flag) and the rule that every successful mutation
//! reloads the full list.

pub mod api;
pub mod board;

pub use api::{ClientError, NotesApi, NotesClient};
pub use board::{Board, EmptyState, ModalMode, ModalState, ToastKind, ToastState, TOAST_TTL};
