use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use log::{debug, info, trace};

use crate::{
    word_count, Note, NoteColor, NoteId, NotesStatistics, SortOrder, ALL_CATEGORIES,
};

/// Source of timestamps for the store
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Holds the notes of a session and the query state used to view them.
///
/// The underlying collection stays in insertion order. Everything handed
/// out to callers is a derived view recomputed on each call. Mutations
/// that name an unknown id do nothing.
pub struct NoteStore {
    /// Notes in insertion order
    notes: Vec<Note>,

    /// Next id to hand out
    next_id: u64,

    /// Free-text filter applied to title and content
    search_query: String,

    /// Category filter, `ALL_CATEGORIES` disables it
    selected_category: String,

    sort_order: SortOrder,

    clock: Box<dyn Clock>,

    /// Last timestamp issued, keeps time from running backwards
    last_timestamp: Option<DateTime<Utc>>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    /// Creates an empty store reading time from the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty store reading time from `clock`
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            search_query: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            sort_order: SortOrder::default(),
            clock: Box::new(clock),
            last_timestamp: None,
        }
    }

    fn timestamp(&mut self) -> DateTime<Utc> {
        let now = match self.last_timestamp {
            Some(last) => self.clock.now().max(last),
            None => self.clock.now(),
        };
        self.last_timestamp = Some(now);
        now
    }

    /// Replaces the note with `id` by the value `change` builds from it.
    ///
    /// Returns false when no such note exists.
    fn replace_note<F>(&mut self, id: NoteId, change: F) -> bool
    where
        F: FnOnce(&Note) -> Note,
    {
        match self.notes.iter().position(|note| note.id == id) {
            Some(index) => {
                let replacement = change(&self.notes[index]);
                self.notes[index] = replacement;
                true
            }
            None => {
                debug!("No note with ID {}, ignoring change", id);
                false
            }
        }
    }

    /// Adds a note and returns the ID it was given.
    ///
    /// The title is not validated here, callers are expected to refuse
    /// blank titles before calling.
    pub fn add(&mut self, title: &str, content: &str, category: &str) -> NoteId {
        let id = NoteId::new(self.next_id);
        self.next_id += 1;

        let now = self.timestamp();
        self.notes.push(Note::new(
            id,
            title.to_string(),
            content.to_string(),
            category.to_string(),
            now,
        ));

        info!("Added note {} in category '{}'", id, category);
        id
    }

    /// Removes a note. Deleting an unknown ID is a no-op.
    pub fn delete(&mut self, id: NoteId) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);

        if self.notes.len() < before {
            info!("Deleted note {}", id);
        } else {
            debug!("No note with ID {}, nothing deleted", id);
        }
    }

    /// Replaces title and content and bumps the modification time
    pub fn update_content(&mut self, id: NoteId, title: &str, content: &str) {
        if self.get(id).is_none() {
            debug!("No note with ID {}, ignoring content update", id);
            return;
        }

        let now = self.timestamp();
        if self.replace_note(id, |note| Note {
            title: title.to_string(),
            content: content.to_string(),
            updated_at: now,
            ..note.clone()
        }) {
            info!("Updated content of note {}", id);
        }
    }

    pub fn toggle_pin(&mut self, id: NoteId) {
        if self.replace_note(id, |note| Note {
            is_pinned: !note.is_pinned,
            ..note.clone()
        }) {
            info!("Toggled pin on note {}", id);
        }
    }

    pub fn archive(&mut self, id: NoteId) {
        if self.replace_note(id, |note| Note {
            is_archived: true,
            ..note.clone()
        }) {
            info!("Archived note {}", id);
        }
    }

    pub fn unarchive(&mut self, id: NoteId) {
        if self.replace_note(id, |note| Note {
            is_archived: false,
            ..note.clone()
        }) {
            info!("Unarchived note {}", id);
        }
    }

    pub fn set_color(&mut self, id: NoteId, color: NoteColor) {
        if self.replace_note(id, |note| Note {
            color,
            ..note.clone()
        }) {
            info!("Set color of note {} to {}", id, color.name());
        }
    }

    pub fn set_tags(&mut self, id: NoteId, tags: Vec<String>) {
        if self.replace_note(id, |note| Note {
            tags,
            ..note.clone()
        }) {
            info!("Replaced tags of note {}", id);
        }
    }

    pub fn set_reminder(&mut self, id: NoteId, reminder_time: Option<DateTime<Utc>>) {
        if self.replace_note(id, |note| Note {
            reminder_time,
            ..note.clone()
        }) {
            info!("Set reminder of note {}", id);
        }
    }

    pub fn set_search_query(&mut self, query: &str) {
        debug!("Search query set to '{}'", query);
        self.search_query = query.to_string();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        debug!("Sort order set to {:?}", order);
        self.sort_order = order;
    }

    pub fn set_selected_category(&mut self, category: &str) {
        debug!("Selected category set to '{}'", category);
        self.selected_category = category.to_string();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Looks up a note by ID
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Number of notes held, archived included
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn sorted<'a>(&self, mut notes: Vec<&'a Note>) -> Vec<&'a Note> {
        // sort_by is stable, ties keep insertion order
        let order = self.sort_order;
        notes.sort_by(|a, b| order.compare(a, b));
        notes
    }

    /// Non-archived notes matching the category filter and search text,
    /// in the current sort order
    pub fn filtered_notes(&self) -> Vec<&Note> {
        // Blank text disables the search, otherwise it is matched as typed
        let search_blank = self.search_query.trim().is_empty();
        let query = self.search_query.to_lowercase();
        let all_categories = self.selected_category == ALL_CATEGORIES;

        let matching: Vec<&Note> = self
            .notes
            .iter()
            .filter(|note| !note.is_archived)
            .filter(|note| all_categories || note.category == self.selected_category)
            .filter(|note| {
                let keep = search_blank || note.matches_text(&query);
                trace!("Note {} search match: {}", note.id, keep);
                keep
            })
            .collect();

        debug!(
            "{} of {} notes match category '{}' and query '{}'",
            matching.len(),
            self.notes.len(),
            self.selected_category,
            self.search_query
        );
        self.sorted(matching)
    }

    /// Pinned notes that are not archived, in the current sort order
    pub fn pinned_notes(&self) -> Vec<&Note> {
        let pinned = self
            .notes
            .iter()
            .filter(|note| note.is_pinned && !note.is_archived)
            .collect();
        self.sorted(pinned)
    }

    /// Archived notes, in the current sort order
    pub fn archived_notes(&self) -> Vec<&Note> {
        let archived = self.notes.iter().filter(|note| note.is_archived).collect();
        self.sorted(archived)
    }

    /// Sorted distinct categories across all notes, archived included
    pub fn unique_categories(&self) -> Vec<String> {
        self.notes
            .iter()
            .map(|note| note.category.as_str())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// `ALL_CATEGORIES` followed by the unique categories
    pub fn all_categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        categories.extend(self.unique_categories());
        categories
    }

    pub fn statistics(&self) -> NotesStatistics {
        let active: Vec<&Note> = self.notes.iter().filter(|note| !note.is_archived).collect();

        let average_words_per_note = if active.is_empty() {
            0.0
        } else {
            let words: usize = active.iter().map(|note| word_count(&note.content)).sum();
            words as f64 / active.len() as f64
        };

        NotesStatistics {
            total_notes: active.len(),
            pinned_notes: active.iter().filter(|note| note.is_pinned).count(),
            archived_notes: self.notes.len() - active.len(),
            categories_count: self.unique_categories().len(),
            average_words_per_note,
        }
    }

    /// Renders every non-archived note, in insertion order, as plain text
    pub fn export_as_text(&self) -> String {
        self.notes
            .iter()
            .filter(|note| !note.is_archived)
            .map(|note| {
                format!(
                    "=== {} ===\n{}\n[{}]\nCategory: {}",
                    note.title,
                    note.content,
                    note.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    note.category
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
