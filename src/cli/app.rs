//! CLI module for the quicknotes application
//!
//! This module runs the interactive shell: it reads command lines, applies
//! them to the note store and renders the resulting views.
use std::io::{BufRead, Write};

use clap::{error::ErrorKind, Parser};
use console::{Color, Style};
use log::{debug, info, warn};

use crate::{
    content_preview, parse_tags, Config, Note, NoteColor, NoteId, NoteStore, NotesError,
    Result, ShellCommand, ShellInput, ALL_CATEGORIES, DEFAULT_CATEGORY,
};

/// What the shell loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Shell handler - owns the note store and writes every view to `out`
pub struct App<W: Write> {
    /// The note store for this session
    store: NoteStore,

    /// Application configuration
    config: Config,

    /// Where rendered output goes
    out: W,
}

fn require(store: &NoteStore, id: NoteId) -> Result<&Note> {
    store.get(id).ok_or(NotesError::NoteNotFound { id })
}

fn swatch_color(color: NoteColor) -> Color {
    match color {
        NoteColor::White => Color::White,
        NoteColor::Yellow => Color::Yellow,
        NoteColor::Blue => Color::Blue,
        NoteColor::Green => Color::Green,
        NoteColor::Pink => Color::Color256(218),
        NoteColor::Purple => Color::Magenta,
    }
}

impl<W: Write> App<W> {
    /// Create a new shell over `store`, applying the configured sort order
    pub fn new(mut store: NoteStore, config: Config, out: W) -> Self {
        store.set_sort_order(config.sort_order);
        Self { store, config, out }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Consumes the shell and hands back its output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads commands from `input` until end of input or `quit`.
    ///
    /// Failed commands are reported and the session carries on.
    pub fn run_session<R: BufRead>(&mut self, mut input: R, interactive: bool) -> Result<()> {
        info!("Shell session started");
        loop {
            if interactive {
                write!(self.out, "{}", self.config.prompt)?;
                self.out.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match self.execute_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => self.report(&e)?,
            }
        }
        info!("Shell session ended");
        Ok(())
    }

    /// Writes a command failure to the output
    pub fn report(&mut self, error: &NotesError) -> Result<()> {
        warn!("Command failed: {}", error);
        writeln!(self.out, "error: {}", error)?;
        Ok(())
    }

    /// Parses and runs one shell line
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = shell_words::split(line).map_err(|e| NotesError::CommandError {
            message: format!("Failed to parse command: {}", e),
        })?;

        match ShellInput::try_parse_from(words) {
            Ok(input) => self.run(input.command),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(self.out, "{}", e)?;
                Ok(Flow::Continue)
            }
            Err(e) => Err(NotesError::CommandError {
                message: e.to_string().trim_start_matches("error: ").trim_end().to_string(),
            }),
        }
    }

    /// Run a parsed shell command
    pub fn run(&mut self, command: ShellCommand) -> Result<Flow> {
        debug!("Running shell command: {:?}", command);
        match command {
            ShellCommand::Add {
                title,
                content,
                category,
                tags,
                remind,
            } => self.create_note(title, content, category, tags, remind)?,

            ShellCommand::Edit { id, title, content } => self.handle_edit(id, title, content)?,

            ShellCommand::Delete { id } => {
                let title = require(&self.store, id)?.title.clone();
                self.store.delete(id);
                self.emit(&format!("Note '{}' ({}) has been deleted.", title, id))?;
            }

            ShellCommand::Pin { id } => {
                require(&self.store, id)?;
                self.store.toggle_pin(id);
                let pinned = require(&self.store, id)?.is_pinned;
                self.emit(&format!(
                    "Note {} {}",
                    id,
                    if pinned { "pinned" } else { "unpinned" }
                ))?;
            }

            ShellCommand::Archive { id } => {
                require(&self.store, id)?;
                self.store.archive(id);
                self.emit(&format!("Note {} moved to the archive", id))?;
            }

            ShellCommand::Unarchive { id } => {
                require(&self.store, id)?;
                self.store.unarchive(id);
                self.emit(&format!("Note {} restored from the archive", id))?;
            }

            ShellCommand::Color { id, color } => {
                require(&self.store, id)?;
                self.store.set_color(id, color);
                let swatch = self.swatch(color);
                self.emit(&format!("Note {} is now {}", id, swatch))?;
            }

            ShellCommand::Tag { id, tags } => {
                require(&self.store, id)?;
                self.store.set_tags(id, parse_tags(Some(tags)));
                let tags = require(&self.store, id)?.tags.join(", ");
                self.emit(&format!("Tags of note {}: {}", id, tags))?;
            }

            ShellCommand::Show { id, json } => {
                let note = require(&self.store, id)?;
                let rendered = if json {
                    serde_json::to_string_pretty(note)?
                } else {
                    self.render_note_detail(note)
                };
                self.emit(&rendered)?;
            }

            ShellCommand::List { json, pinned } => {
                let notes = if pinned {
                    self.store.pinned_notes()
                } else {
                    self.store.filtered_notes()
                };
                let rendered = self.render_notes(&notes, json)?;
                self.emit(&rendered)?;
            }

            ShellCommand::Archived { json } => {
                let rendered = self.render_notes(&self.store.archived_notes(), json)?;
                self.emit(&rendered)?;
            }

            ShellCommand::Search { query } => self.handle_search(query.join(" "))?,

            ShellCommand::Sort { order } => {
                self.store.set_sort_order(order);
                self.emit(&format!("Sorting {}", order.label()))?;
            }

            ShellCommand::Filter { category } => self.handle_filter(category)?,

            ShellCommand::Categories => {
                let selected = self.store.selected_category().to_string();
                let lines: Vec<String> = self
                    .store
                    .all_categories()
                    .into_iter()
                    .map(|category| {
                        let marker = if category == selected { "*" } else { " " };
                        format!("{} {}", marker, category)
                    })
                    .collect();
                self.emit(&lines.join("\n"))?;
            }

            ShellCommand::Stats { json } => {
                let stats = self.store.statistics();
                let rendered = if json {
                    serde_json::to_string_pretty(&stats)?
                } else {
                    format!(
                        "Notes:          {}\nPinned:         {}\nArchived:       {}\nCategories:     {}\nAverage words:  {:.1}",
                        stats.total_notes,
                        stats.pinned_notes,
                        stats.archived_notes,
                        stats.categories_count,
                        stats.average_words_per_note
                    )
                };
                self.emit(&rendered)?;
            }

            ShellCommand::Export => {
                let text = self.store.export_as_text();
                if text.is_empty() {
                    self.emit("No notes to export.")?;
                } else {
                    self.emit(&text)?;
                }
            }

            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn create_note(
        &mut self,
        title: String,
        content: Option<String>,
        category: Option<String>,
        tags: Option<String>,
        remind: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NotesError::InvalidInput {
                message: "Title cannot be blank".to_string(),
            });
        }

        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        if category == ALL_CATEGORIES {
            return Err(NotesError::InvalidInput {
                message: format!("'{}' is reserved for the category filter", ALL_CATEGORIES),
            });
        }

        let id = self
            .store
            .add(title, content.as_deref().unwrap_or(""), &category);

        let parsed_tags = parse_tags(tags);
        if !parsed_tags.is_empty() {
            self.store.set_tags(id, parsed_tags);
        }
        if remind.is_some() {
            self.store.set_reminder(id, remind);
        }

        self.emit(&format!("Note created with ID: {}", id))
    }

    fn handle_edit(
        &mut self,
        id: NoteId,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<()> {
        if title.is_none() && content.is_none() {
            return Err(NotesError::InvalidInput {
                message: "Nothing to change, pass --title and/or --content".to_string(),
            });
        }

        let note = require(&self.store, id)?;
        let new_title = title.unwrap_or_else(|| note.title.clone());
        let new_content = content.unwrap_or_else(|| note.content.clone());

        if new_title.trim().is_empty() {
            return Err(NotesError::InvalidInput {
                message: "Title cannot be blank".to_string(),
            });
        }

        self.store.update_content(id, new_title.trim(), &new_content);
        self.emit(&format!("Note {} updated successfully", id))
    }

    fn handle_search(&mut self, query: String) -> Result<()> {
        self.store.set_search_query(&query);
        let matches = self.store.filtered_notes().len();

        if query.trim().is_empty() {
            self.emit(&format!("Search cleared, {} notes listed", matches))
        } else {
            self.emit(&format!(
                "Searching for \"{}\": {} matching note{}",
                query,
                matches,
                if matches == 1 { "" } else { "s" }
            ))
        }
    }

    fn handle_filter(&mut self, category: String) -> Result<()> {
        let category = category.trim().to_string();
        self.store.set_selected_category(&category);

        if category == ALL_CATEGORIES {
            return self.emit("Showing all categories");
        }

        if !self.store.unique_categories().contains(&category) {
            self.emit(&format!("No notes in category '{}' yet", category))?;
        }
        self.emit(&format!("Showing category '{}'", category))
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.config.color_output {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn swatch(&self, color: NoteColor) -> String {
        let block = self.paint("■", Style::new().fg(swatch_color(color)));
        format!("{} {}", block, color.name())
    }

    fn flags(note: &Note) -> String {
        let mut flags = String::new();
        if note.is_pinned {
            flags.push_str(" [pinned]");
        }
        if note.is_archived {
            flags.push_str(" [archived]");
        }
        flags
    }

    /// Render notes as text or JSON
    fn render_notes(&self, notes: &[&Note], json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(notes)?);
        }

        if notes.is_empty() {
            return Ok("No notes found matching the criteria.".to_string());
        }

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        let mut lines = Vec::new();
        for (i, note) in notes.iter().enumerate() {
            if i > 0 {
                lines.push("-".repeat(term_width.min(50)));
            }

            lines.push(format!(
                "ID: {} | Updated: {}{}",
                note.id,
                note.updated_at.format(&self.config.date_format),
                Self::flags(note)
            ));
            lines.push(format!(
                "Title: {}",
                self.paint(&note.title, Style::new().bold())
            ));
            lines.push(format!(
                "Category: {} | Color: {}",
                note.category,
                self.swatch(note.color)
            ));

            if !note.tags.is_empty() {
                let tags = note
                    .tags
                    .iter()
                    .map(|tag| format!("#{}", tag))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(format!("Tags: {}", self.paint(&tags, Style::new().cyan())));
            }

            let preview = content_preview(&note.content, self.config.preview_length);
            if !preview.is_empty() {
                lines.push(preview);
            }
        }

        lines.push(format!(
            "\nFound {} note{}",
            notes.len(),
            if notes.len() == 1 { "" } else { "s" }
        ));
        Ok(lines.join("\n"))
    }

    fn render_note_detail(&self, note: &Note) -> String {
        let mut lines = vec![
            format!("ID:       {}{}", note.id, Self::flags(note)),
            format!("Title:    {}", self.paint(&note.title, Style::new().bold())),
            format!("Category: {}", note.category),
            format!("Color:    {}", self.swatch(note.color)),
            format!(
                "Created:  {}",
                note.created_at.format(&self.config.date_format)
            ),
            format!(
                "Updated:  {}",
                note.updated_at.format(&self.config.date_format)
            ),
        ];

        if !note.tags.is_empty() {
            lines.push(format!("Tags:     {}", note.tags.join(", ")));
        }
        if let Some(reminder) = note.reminder_time {
            lines.push(format!(
                "Reminder: {}",
                reminder.format(&self.config.date_format)
            ));
        }
        if !note.content.is_empty() {
            lines.push(String::new());
            lines.push(note.content.clone());
        }

        lines.join("\n")
    }
}
