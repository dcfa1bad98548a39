//! Client commands of the `notes` CLI.
//!
//! Each command loads a [`Board`] from a running server, performs one
//! action the way the browser page would, and prints the resulting toast
//! and note list.

use anyhow::{anyhow, Result};

use crate::client::{Board, NotesApi, NotesClient};
use crate::models::{NewNote, Note, NoteChanges};

/// Field values for `notes edit`.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub clear_tags: bool,
    pub pinned: Option<bool>,
}

impl EditArgs {
    fn into_changes(self) -> NoteChanges {
        let tags = if self.clear_tags {
            Some(Vec::new())
        } else if self.tags.is_empty() {
            None
        } else {
            Some(self.tags)
        };

        NoteChanges {
            title: self.title,
            content: self.content,
            tags,
            is_pinned: self.pinned,
        }
    }
}

async fn open_board(base_url: &str) -> Result<Board<NotesClient>> {
    let mut board = Board::new(NotesClient::new(base_url));
    board
        .load()
        .await
        .map_err(|e| anyhow!("could not reach notes server at {}: {}", base_url, e))?;
    Ok(board)
}

fn find_note<A: NotesApi>(board: &Board<A>, id: &str) -> Result<Note> {
    board
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("note not found: {}", id))
}

pub async fn run_list(base_url: &str) -> Result<()> {
    let board = open_board(base_url).await?;
    print_board(&board);
    Ok(())
}

pub async fn run_add(
    base_url: &str,
    title: String,
    content: String,
    tags: Vec<String>,
) -> Result<()> {
    let mut board = open_board(base_url).await?;
    board.open_add();
    let note = board
        .submit_add(NewNote {
            title: Some(title),
            content: Some(content),
            tags: Some(tags),
        })
        .await?;
    println!("id: {}", note.id);
    print_board(&board);
    Ok(())
}

pub async fn run_edit(base_url: &str, id: &str, args: EditArgs) -> Result<()> {
    let mut board = open_board(base_url).await?;
    let note = find_note(&board, id)?;
    board.open_edit(note);
    board.submit_edit(args.into_changes()).await?;
    print_board(&board);
    Ok(())
}

pub async fn run_delete(base_url: &str, id: &str) -> Result<()> {
    let mut board = open_board(base_url).await?;
    let note = find_note(&board, id)?;
    board.delete_note(&note).await?;
    print_board(&board);
    Ok(())
}

pub async fn run_toggle_pin(base_url: &str, id: &str) -> Result<()> {
    let mut board = open_board(base_url).await?;
    let note = find_note(&board, id)?;
    board.toggle_pin(&note).await?;
    print_board(&board);
    Ok(())
}

pub async fn run_search(base_url: &str, query: &str) -> Result<()> {
    let mut board = Board::new(NotesClient::new(base_url));
    board
        .search(query)
        .await
        .map_err(|e| anyhow!("search against {} failed: {}", base_url, e))?;
    print_board(&board);
    Ok(())
}

fn print_board<A: NotesApi>(board: &Board<A>) {
    if board.toast().shown {
        println!("{}", board.toast().message);
        println!();
    }

    if let Some(empty) = board.empty_state() {
        println!("{}", empty.message());
        return;
    }

    for note in board.notes() {
        println!("{}", format_note(note));
    }
}

/// One note as printed by the CLI: a header line, then the content.
pub fn format_note(note: &Note) -> String {
    let pin = if note.is_pinned { "[pinned] " } else { "" };
    let mut out = format!(
        "{}{}  ({})  {}\n    {}",
        pin,
        note.title,
        note.id,
        note.created_on.format("%-d %b %Y"),
        note.content
    );
    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
        out.push_str("\n    ");
        out.push_str(&tags.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_args_tag_handling() {
        let changes = EditArgs::default().into_changes();
        assert!(changes.tags.is_none());

        let changes = EditArgs {
            clear_tags: true,
            tags: vec!["ignored".into()],
            ..Default::default()
        }
        .into_changes();
        assert_eq!(changes.tags, Some(vec![]));

        let changes = EditArgs {
            tags: vec!["a".into()],
            ..Default::default()
        }
        .into_changes();
        assert_eq!(changes.tags, Some(vec!["a".to_string()]));
    }

    #[test]
    fn format_note_marks_pins_and_tags() {
        let mut note = Note::new("Title".into(), "Body".into(), vec!["work".into()]);
        note.is_pinned = true;
        let text = format_note(&note);
        assert!(text.starts_with("[pinned] Title"));
        assert!(text.contains("#work"));
        assert!(text.contains("Body"));
    }
}
