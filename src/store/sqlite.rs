//! SQLite-backed [`NoteStore`] implementation.
//!
//! One row per note in the `notes` table (see [`crate::migrate`]). Tags are
//! stored as a JSON array, `created_on` as Unix milliseconds.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::models::Note;

use super::NoteStore;

const NOTE_COLUMNS: &str = "id, title, content, tags_json, is_pinned, created_on";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to the configured database and ensures the schema exists.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

}

fn row_to_note(row: &SqliteRow) -> Result<Note> {
    let id: String = row.get("id");
    let tags_json: String = row.get("tags_json");
    let created_on: i64 = row.get("created_on");

    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .with_context(|| format!("invalid tags_json for note {}", id))?;
    let created_on = DateTime::from_timestamp_millis(created_on)
        .with_context(|| format!("invalid created_on for note {}", id))?;

    Ok(Note {
        title: row.get("title"),
        content: row.get("content"),
        tags,
        is_pinned: row.get::<i64, _>("is_pinned") != 0,
        created_on,
        id,
    })
}

#[async_trait]
impl NoteStore for SqliteStore {
    async fn insert(&self, note: &Note) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, title, content, tags_json, is_pinned, created_on)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(serde_json::to_string(&note.tags)?)
        .bind(note.is_pinned)
        .bind(note.created_on.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Note>> {
        let row = sqlx::query(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_note).transpose()
    }

    async fn save(&self, note: &Note) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = ?, content = ?, tags_json = ?, is_pinned = ?
            WHERE id = ?
            "#,
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(serde_json::to_string(&note.tags)?)
        .bind(note.is_pinned)
        .bind(&note.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_pinned_first(&self) -> Result<Vec<Note>> {
        let rows = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY is_pinned DESC, rowid ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_note).collect()
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        // LIKE and lower() fold ASCII case only; match on decoded rows instead
        let rows = sqlx::query(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY rowid ASC"))
            .fetch_all(&self.pool)
            .await?;

        let mut hits = Vec::new();
        for row in &rows {
            let note = row_to_note(row)?;
            if note.matches(query) {
                hits.push(note);
            }
        }
        Ok(hits)
    }
}
