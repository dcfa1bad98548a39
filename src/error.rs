//! Error types for the notes API.
//!
//! Every handler failure becomes a [`NoteError`], which renders as the
//! `{ "error": true, "message": "..." }` body the client expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed message returned for every store or unexpected failure.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Result type alias for note operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Errors produced by [`NoteService`](crate::notes::NoteService) operations.
#[derive(Error, Debug)]
pub enum NoteError {
    /// The request did not carry enough (or well-formed) input. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// The referenced note does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Store or unexpected failure. HTTP 500; the cause is logged, never sent.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl NoteError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound("Note not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(msg) | Self::NotFound(msg) => msg,
            Self::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), "note store failure");
                INTERNAL_MESSAGE.to_string()
            }
        };

        (
            status,
            Json(ErrorBody {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
