//! # Notes Service
//!
//! A small notes system: an HTTP CRUD API over a document store, and a
//! client that lists, creates, edits, pins, searches and deletes notes
//! through that API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  HTTP/JSON  ┌──────────────┐   ┌─────────────┐
//! │    Client    │────────────▶│    Server    │──▶│ NoteService │
//! │ Board + API  │◀────────────│  (axum)      │   └──────┬──────┘
//! └──────────────┘             └──────────────┘          ▼
//!                                                 ┌─────────────┐
//!                                                 │  NoteStore  │
//!                                                 │ SQLite / mem│
//!                                                 └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! notes init                         # create database
//! notes serve                        # start HTTP server
//! notes add "Groceries" "milk, eggs" --tag home
//! notes list
//! notes search milk
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Note and request types |
//! | [`store`] | Document store trait and backends |
//! | [`notes`] | Note operations and validation |
//! | [`server`] | HTTP server |
//! | [`error`] | API error type |
//! | [`client`] | HTTP client and board state |
//! | [`commands`] | CLI client commands |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod client;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod notes;
pub mod server;
pub mod store;
