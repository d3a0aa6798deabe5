//! Shared types for the quicknotes application.
//!
//! This module contains the query and view types handed out by the store
//! along with the command grammar of the interactive shell.
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use clap::{Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{Note, NoteColor, NoteId, NotesError};

/// A specialized Result type for quicknotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Order in which derived note lists are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SortOrder {
    /// Most recently updated first
    #[default]
    #[serde(rename = "newest")]
    #[value(name = "newest")]
    DateNewest,
    /// Least recently updated first
    #[serde(rename = "oldest")]
    #[value(name = "oldest")]
    DateOldest,
    #[serde(rename = "title-asc")]
    #[value(name = "title-asc")]
    TitleAsc,
    #[serde(rename = "title-desc")]
    #[value(name = "title-desc")]
    TitleDesc,
}

impl SortOrder {
    /// Compares two notes by this order's key only.
    ///
    /// Equal keys yield `Ordering::Equal` so a stable sort keeps insertion
    /// order for ties in every direction.
    pub fn compare(self, a: &Note, b: &Note) -> Ordering {
        match self {
            SortOrder::DateNewest => b.updated_at.cmp(&a.updated_at),
            SortOrder::DateOldest => a.updated_at.cmp(&b.updated_at),
            // Unicode code point order, not UTF-16 unit order
            SortOrder::TitleAsc => a.title.cmp(&b.title),
            SortOrder::TitleDesc => b.title.cmp(&a.title),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::DateNewest => "newest first",
            SortOrder::DateOldest => "oldest first",
            SortOrder::TitleAsc => "title A-Z",
            SortOrder::TitleDesc => "title Z-A",
        }
    }
}

/// Aggregate counts over the current note collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotesStatistics {
    /// Notes that are not archived
    pub total_notes: usize,
    /// Pinned notes that are not archived
    pub pinned_notes: usize,
    pub archived_notes: usize,
    /// Distinct categories, archived notes included
    pub categories_count: usize,
    /// Mean whitespace-delimited word count of non-archived notes
    pub average_words_per_note: f64,
}

/// Commands accepted by the interactive shell
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Create a new note
    Add {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Body of the note
        #[clap(short, long)]
        content: Option<String>,

        /// Category used for grouping, defaults to "General"
        #[clap(short = 'g', long)]
        category: Option<String>,

        /// Tags to attach (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,

        /// Reminder time in RFC 3339 format
        #[clap(short, long)]
        remind: Option<DateTime<Utc>>,
    },

    /// Change the title and/or content of a note
    Edit {
        /// ID of the note to edit
        id: NoteId,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: NoteId,
    },

    /// Pin or unpin a note
    Pin {
        /// ID of the note to toggle
        id: NoteId,
    },

    /// Move a note to the archive
    Archive {
        /// ID of the note to archive
        id: NoteId,
    },

    /// Bring a note back from the archive
    Unarchive {
        /// ID of the note to restore
        id: NoteId,
    },

    /// Change the tag color of a note
    Color {
        /// ID of the note to recolor
        id: NoteId,

        /// New color
        #[clap(value_enum)]
        color: NoteColor,
    },

    /// Replace the tags of a note
    Tag {
        /// ID of the note to tag
        id: NoteId,

        /// Tags to set (comma-separated, empty clears)
        #[clap(default_value = "")]
        tags: String,
    },

    /// Show a single note in full
    Show {
        /// ID of the note to show
        id: NoteId,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List notes matching the current search and category filter
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Only show pinned notes
        #[clap(short, long)]
        pinned: bool,
    },

    /// List archived notes
    Archived {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Set the search text; no words clears it
    Search {
        #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Set the sort order
    Sort {
        #[clap(value_enum)]
        order: SortOrder,
    },

    /// Restrict listings to one category ("All" removes the filter)
    Filter {
        category: String,
    },

    /// List known categories
    Categories,

    /// Show note statistics
    Stats {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Print all non-archived notes as plain text
    Export,

    /// Leave the shell
    #[clap(alias = "exit")]
    Quit,
}
