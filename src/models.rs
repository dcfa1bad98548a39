//! Core data models used throughout the notes service.
//!
//! [`Note`] is the only persisted entity. The remaining types are the
//! request shapes accepted by the API and the field-presence rules the
//! edit operation applies to them.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A persisted note, serialized in the wire shape the browser client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_on: DateTime<Utc>,
}

impl Note {
    /// Builds a fresh, unpinned note with a new id and the current time,
    /// truncated to the millisecond precision the SQLite store keeps.
    pub fn new(title: String, content: String, tags: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            content,
            tags,
            is_pinned: false,
            created_on: Utc::now().trunc_subsecs(3),
        }
    }

    /// Case-insensitive literal substring match against title or content.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

/// Body of `POST /add-note`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Body of `PUT /edit-note/{id}`. Every field is optional; `null` is the
/// same as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl NoteChanges {
    /// Title to apply, if one was provided. Empty strings do not count.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Content to apply, if provided. Empty strings do not count.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether any of title, content or tags carries a change.
    ///
    /// `is_pinned` does not count, so a pin-only edit is rejected. Pinning
    /// goes through `PUT /update-note-pinned/{id}`.
    pub fn has_changes(&self) -> bool {
        self.title().is_some() || self.content().is_some() || self.tags.is_some()
    }

    /// Applies every provided field to `note` in place.
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = self.title() {
            note.title = title.to_string();
        }
        if let Some(content) = self.content() {
            note.content = content.to_string();
        }
        if let Some(ref tags) = self.tags {
            note.tags = tags.clone();
        }
        if let Some(pinned) = self.is_pinned {
            note.is_pinned = pinned;
        }
    }
}

/// Body of `PUT /update-note-pinned/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinUpdate {
    #[serde(default)]
    pub is_pinned: Option<bool>,
}

/// Query string of `GET /search-notes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}
