// src/application/services.rs
use async_trait::async_trait;

use crate::domain::{DomainError, Note};

/// Lookup against the external identity provider.
///
/// `Ok(None)` means no user is signed in; only transport problems are
/// errors.
#[async_trait]
pub trait IdentityProvider {
    async fn current_user(&self) -> Result<Option<String>, DomainError>;
}

/// The managed note API. Every call is scoped to the authenticated caller.
#[async_trait]
pub trait NoteApi {
    /// Full note collection, in the order the API returns it.
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    /// Create a note record; the API assigns `id` and `owner`.
    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError>;

    async fn delete_note(&self, id: &str) -> Result<(), DomainError>;
}

/// Key-addressed blob storage with short-lived download URLs.
#[async_trait]
pub trait BlobStore {
    /// Store bytes under `key`, overwriting any existing object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), DomainError>;

    /// A dereferenceable, time-limited URL for the object.
    async fn get_url(&self, key: &str) -> Result<String, DomainError>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Creation payload for the note API.
///
/// Deliberately has no display-URL field: derived view state never flows
/// back to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteInput {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}
