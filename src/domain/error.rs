// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No authenticated user; sign in before creating notes")]
    IdentityUnresolved,
    #[error("Identity lookup failed: {0}")]
    IdentityLookup(String),
    #[error("Invalid note draft: {0}")]
    InvalidDraft(String),
    #[error("Note API error: {0}")]
    Api(String),
    #[error("Blob store error: {0}")]
    BlobStore(String),
    #[error("Note not found: {0}")]
    NoteNotFound(String),
}
