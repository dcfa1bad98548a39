//! HTTP server for the notes API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/` | Liveness greeting (`{"data":"hello"}`) |
//! | `GET`    | `/health` | Health check (returns version) |
//! | `POST`   | `/add-note` | Create a note |
//! | `PUT`    | `/edit-note/{id}` | Partially update a note |
//! | `GET`    | `/get-all-notes` | List notes, pinned first |
//! | `DELETE` | `/delete-note/{id}` | Delete a note |
//! | `PUT`    | `/update-note-pinned/{id}` | Set the pin flag |
//! | `GET`    | `/search-notes?query=` | Substring search over title and content |
//!
//! # Response Contract
//!
//! Success bodies carry `"error": false`, a human-readable `message`, and
//! `note` or `notes` where applicable. Failures are rendered by
//! [`NoteError`]:
//!
//! ```json
//! { "error": true, "message": "Note not found" }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the browser client
//! can be served from anywhere.

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request, State,
    },
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{NoteError, Result};
use crate::models::{NewNote, Note, NoteChanges, PinUpdate, SearchParams};
use crate::notes::NoteService;
use crate::store;

/// JSON body extractor whose rejections render as `400 {"error":true,...}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(NoteError))]
pub struct JsonBody<T>(pub T);

/// Query-string extractor with the same rejection shape as [`JsonBody`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(NoteError))]
pub struct QueryParams<T>(pub T);

/// Path-segment extractor with the same rejection shape as [`JsonBody`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(NoteError))]
pub struct PathParam<T>(pub T);

/// JSON body that may be left out. An empty body reads as `T::default()`;
/// a body that is present must still be valid JSON for `T`.
pub struct OptionalJsonBody<T>(pub T);

impl<T, S> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = NoteError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "failed to read request body");
            NoteError::validation("Invalid request body")
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "rejected request body");
            NoteError::validation("Invalid request body")
        })
    }
}

impl From<JsonRejection> for NoteError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        NoteError::validation("Invalid request body")
    }
}

impl From<QueryRejection> for NoteError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected query string");
        NoteError::validation("Invalid query string")
    }
}

impl From<PathRejection> for NoteError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected path");
        NoteError::validation("Invalid note id")
    }
}

/// Builds the router with every endpoint, CORS and request tracing.
pub fn router(service: NoteService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/add-note", post(handle_add_note))
        .route("/edit-note/{id}", put(handle_edit_note))
        .route("/get-all-notes", get(handle_get_all_notes))
        .route("/delete-note/{id}", delete(handle_delete_note))
        .route("/update-note-pinned/{id}", put(handle_update_pinned))
        .route("/search-notes", get(handle_search_notes))
        .route("/search-notes/", get(handle_search_notes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Starts the notes HTTP server.
///
/// Opens the configured store (running migrations for SQLite), binds to
/// `[server].bind` and serves until Ctrl+C or SIGTERM.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = store::open(config).await?;
    let app = router(NoteService::new(store));

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "notes server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("notes server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}

// ============ Response bodies ============

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub error: bool,
    pub note: Note,
    pub message: String,
}

impl NoteResponse {
    fn ok(note: Note, message: &str) -> Json<Self> {
        Json(Self {
            error: false,
            note,
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesResponse {
    pub error: bool,
    pub notes: Vec<Note>,
    pub message: String,
}

impl NotesResponse {
    fn ok(notes: Vec<Note>, message: &str) -> Json<Self> {
        Json(Self {
            error: false,
            notes,
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub error: bool,
    pub message: String,
}

// ============ Handlers ============

async fn handle_root() -> Json<HelloResponse> {
    Json(HelloResponse {
        data: "hello".to_string(),
    })
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_add_note(
    State(service): State<NoteService>,
    JsonBody(input): JsonBody<NewNote>,
) -> Result<Json<NoteResponse>> {
    let note = service.create(input).await?;
    Ok(NoteResponse::ok(note, "Note added successfully"))
}

async fn handle_edit_note(
    State(service): State<NoteService>,
    PathParam(id): PathParam<String>,
    JsonBody(changes): JsonBody<NoteChanges>,
) -> Result<Json<NoteResponse>> {
    let note = service.edit(&id, changes).await?;
    Ok(NoteResponse::ok(note, "Note updated successfully"))
}

async fn handle_get_all_notes(State(service): State<NoteService>) -> Result<Json<NotesResponse>> {
    let notes = service.list().await?;
    Ok(NotesResponse::ok(notes, "All notes retrieved successfully"))
}

async fn handle_delete_note(
    State(service): State<NoteService>,
    PathParam(id): PathParam<String>,
) -> Result<Json<MessageResponse>> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse {
        error: false,
        message: "Note deleted successfully".to_string(),
    }))
}

async fn handle_update_pinned(
    State(service): State<NoteService>,
    PathParam(id): PathParam<String>,
    OptionalJsonBody(update): OptionalJsonBody<PinUpdate>,
) -> Result<Json<NoteResponse>> {
    let note = service.set_pinned(&id, update).await?;
    Ok(NoteResponse::ok(note, "Note updated successfully"))
}

async fn handle_search_notes(
    State(service): State<NoteService>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<NotesResponse>> {
    let notes = service.search(params.query).await?;
    Ok(NotesResponse::ok(
        notes,
        "Notes matching the search query retrieved successfully",
    ))
}
