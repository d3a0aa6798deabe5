//! Core data structures for the quicknotes application.
//!
//! This module contains the `Note` value along with its identifier and
//! the fixed palette of tag colors.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Category given to notes created without one
pub const DEFAULT_CATEGORY: &str = "General";

/// Category filter value that matches every note
pub const ALL_CATEGORIES: &str = "All";

/// Identifier of a note, assigned by the store when the note is added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    pub fn new(value: u64) -> Self {
        NoteId(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NoteId)
    }
}

/// Tag colors a note can carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    White,
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
}

impl NoteColor {
    /// RGB value of the swatch shown for this color
    pub fn rgb(self) -> u32 {
        match self {
            NoteColor::White => 0xFFFFFF,
            NoteColor::Yellow => 0xFFF59D,
            NoteColor::Blue => 0xBBDEFB,
            NoteColor::Green => 0xC8E6C9,
            NoteColor::Pink => 0xF8BBD9,
            NoteColor::Purple => 0xE1BEE7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoteColor::White => "white",
            NoteColor::Yellow => "yellow",
            NoteColor::Blue => "blue",
            NoteColor::Green => "green",
            NoteColor::Pink => "pink",
            NoteColor::Purple => "purple",
        }
    }
}

/// Represents a single note in our system.
///
/// Notes are treated as values: the store never edits one in place, it
/// builds a changed copy and swaps it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note
    pub id: NoteId,
    /// Note title
    pub title: String,
    /// Free-form body, may be empty
    pub content: String,
    /// Grouping label used by the category filter
    pub category: String,
    /// Tag color
    pub color: NoteColor,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    pub is_pinned: bool,
    pub is_archived: bool,
    /// Carried along, nothing schedules it
    pub reminder_time: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl Note {
    /// Creates a new note with both timestamps set to `now`
    pub fn new(
        id: NoteId,
        title: String,
        content: String,
        category: String,
        now: DateTime<Utc>,
    ) -> Self {
        Note {
            id,
            title,
            content,
            category,
            color: NoteColor::default(),
            created_at: now,
            updated_at: now,
            is_pinned: false,
            is_archived: false,
            reminder_time: None,
            tags: Vec::new(),
        }
    }

    /// Case-insensitive substring match against title or content
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_uses_defaults() {
        let now = Utc::now();
        let note = Note::new(
            NoteId::new(7),
            "Title".to_string(),
            String::new(),
            DEFAULT_CATEGORY.to_string(),
            now,
        );

        assert_eq!(note.color, NoteColor::White);
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.is_pinned);
        assert!(!note.is_archived);
        assert!(note.tags.is_empty());
        assert!(note.reminder_time.is_none());
    }

    #[test]
    fn text_match_ignores_case_in_title_and_content() {
        let note = Note::new(
            NoteId::new(1),
            "Groceries".to_string(),
            "Buy MILK".to_string(),
            DEFAULT_CATEGORY.to_string(),
            Utc::now(),
        );

        assert!(note.matches_text("milk"));
        assert!(note.matches_text("grocer"));
        assert!(!note.matches_text("bread"));
    }

    #[test]
    fn note_id_parses_and_displays() {
        let id: NoteId = " 42 ".parse().unwrap();
        assert_eq!(id, NoteId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<NoteId>().is_err());
    }

    #[test]
    fn color_serializes_lowercase() {
        let json = serde_json::to_string(&NoteColor::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        assert_eq!(NoteColor::Pink.rgb(), 0xF8BBD9);
    }
}
