// src/ports/text.rs
use anyhow::Result;

use crate::domain::Note;

/// Renders note lists for the terminal.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    /// One block per note: id, owner, name, description, and the
    /// resolved image URL when present.
    pub fn render_list(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes yet.\n".to_string();
        }
        let mut out = String::new();
        for note in notes {
            out.push_str(&self.render_row(note));
            out.push('\n');
        }
        out
    }

    fn render_row(&self, note: &Note) -> String {
        let owner = note.owner.as_deref().unwrap_or("-");
        let mut row = format!(
            "{}  [{}]  {}: {}",
            note.id, owner, note.name, note.description
        );
        if let Some(url) = &note.image_display_url {
            row.push_str("\n    image: ");
            row.push_str(url);
        }
        row
    }

    pub fn render_json(&self, notes: &[Note]) -> Result<String> {
        Ok(serde_json::to_string_pretty(notes)?)
    }
}
