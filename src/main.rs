//! # Notes CLI (`notes`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `notes init` | Create the SQLite database and run schema migrations |
//! | `notes serve` | Start the HTTP API server |
//! | `notes list` | Print all notes, pinned first |
//! | `notes add <title> <content>` | Create a note |
//! | `notes edit <id>` | Change a note's title, content, tags or pin |
//! | `notes delete <id>` | Delete a note |
//! | `notes pin <id>` | Toggle a note's pin |
//! | `notes search <query>` | Find notes by title or content |
//!
//! Client commands talk to the server at `[client].base_url` (or `--url`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use notes_service::commands::{self, EditArgs};
use notes_service::config;
use notes_service::migrate;
use notes_service::server;

/// Notes: a small notes service and its command-line client.
#[derive(Parser)]
#[command(name = "notes", version, about = "A small notes service and client")]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/notes.toml`. Client commands fall back to
    /// built-in defaults when the file does not exist.
    #[arg(long, global = true, default_value = "./config/notes.toml")]
    config: PathBuf,

    /// Server URL for client commands; overrides `[client].base_url`.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Safe to run more than once.
    Init,

    /// Start the HTTP API server.
    Serve,

    /// List all notes, pinned first.
    List,

    /// Create a note.
    Add {
        title: String,
        content: String,
        /// Tag to attach; repeat for several.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Edit a note. Only the given fields change.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replace the tags; repeat for several.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Remove every tag.
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
        /// Set the pin flag along with the other changes.
        #[arg(long)]
        pinned: Option<bool>,
    },

    /// Delete a note.
    Delete { id: String },

    /// Toggle a note's pin.
    Pin { id: String },

    /// Search notes by title or content.
    Search { query: String },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_or_default(&cli.config)?;
    let base_url = cli.url.unwrap_or_else(|| cfg.client.base_url.clone());

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => server::run_server(&cfg).await?,
        Commands::List => commands::run_list(&base_url).await?,
        Commands::Add {
            title,
            content,
            tags,
        } => commands::run_add(&base_url, title, content, tags).await?,
        Commands::Edit {
            id,
            title,
            content,
            tags,
            clear_tags,
            pinned,
        } => {
            let args = EditArgs {
                title,
                content,
                tags,
                clear_tags,
                pinned,
            };
            commands::run_edit(&base_url, &id, args).await?;
        }
        Commands::Delete { id } => commands::run_delete(&base_url, &id).await?,
        Commands::Pin { id } => commands::run_toggle_pin(&base_url, &id).await?,
        Commands::Search { query } => commands::run_search(&base_url, &query).await?,
    }

    Ok(())
}
