// src/domain/note.rs
use serde::Serialize;

/// A note as held by the synchronization workflow.
///
/// `image_display_url` is derived view state, resolved from the blob
/// store after a fetch. It never travels back toward the note API; the
/// creation payload is a separate type without such a field.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: String,
    pub owner: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_display_url: Option<String>,
}

/// User-submitted input for a note that does not exist remotely yet.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub name: String,
    pub description: String,
    pub attachment: Option<Attachment>,
}

/// A file to upload alongside a note, keyed by its original name.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
