//! HTTP client for the notes API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::error::ErrorBody;
use crate::models::{NewNote, Note, NoteChanges, PinUpdate};
use crate::server::{MessageResponse, NoteResponse, NotesResponse};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("no note is open for editing")]
    NoEditTarget,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One method per endpoint of the notes API.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn get_all_notes(&self) -> Result<Vec<Note>, ClientError>;

    async fn add_note(&self, input: &NewNote) -> Result<Note, ClientError>;

    async fn edit_note(&self, id: &str, changes: &NoteChanges) -> Result<Note, ClientError>;

    async fn delete_note(&self, id: &str) -> Result<(), ClientError>;

    async fn update_note_pinned(&self, id: &str, is_pinned: bool) -> Result<Note, ClientError>;

    async fn search_notes(&self, query: &str) -> Result<Vec<Note>, ClientError>;
}

/// [`NotesApi`] over HTTP using `reqwest`.
#[derive(Clone)]
pub struct NotesClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl NotesApi for NotesClient {
    async fn get_all_notes(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.http.get(self.url("/get-all-notes")).send().await?;
        Ok(decode::<NotesResponse>(response).await?.notes)
    }

    async fn add_note(&self, input: &NewNote) -> Result<Note, ClientError> {
        let response = self
            .http
            .post(self.url("/add-note"))
            .json(input)
            .send()
            .await?;
        Ok(decode::<NoteResponse>(response).await?.note)
    }

    async fn edit_note(&self, id: &str, changes: &NoteChanges) -> Result<Note, ClientError> {
        let body: NoteResponse = self.put_json(&format!("/edit-note/{}", id), changes).await?;
        Ok(body.note)
    }

    async fn delete_note(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/delete-note/{}", id)))
            .send()
            .await?;
        decode::<MessageResponse>(response).await?;
        Ok(())
    }

    async fn update_note_pinned(&self, id: &str, is_pinned: bool) -> Result<Note, ClientError> {
        let update = PinUpdate {
            is_pinned: Some(is_pinned),
        };
        let body: NoteResponse = self
            .put_json(&format!("/update-note-pinned/{}", id), &update)
            .await?;
        Ok(body.note)
    }

    async fn search_notes(&self, query: &str) -> Result<Vec<Note>, ClientError> {
        let response = self
            .http
            .get(self.url("/search-notes"))
            .query(&[("query", query)])
            .send()
            .await?;
        Ok(decode::<NotesResponse>(response).await?.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = NotesClient::new("http://localhost:8000/");
        assert_eq!(client.url("/get-all-notes"), "http://localhost:8000/get-all-notes");
    }

    #[test]
    fn api_error_display_and_status() {
        let err = ClientError::Api {
            status: 404,
            message: "Note not found".into(),
        };
        assert_eq!(err.to_string(), "Note not found (HTTP 404)");
        assert_eq!(err.status(), Some(404));
        assert_eq!(ClientError::NoEditTarget.status(), None);
    }
}
