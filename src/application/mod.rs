// src/application/mod.rs
pub mod services;
pub mod workflow;

pub use services::{BlobStore, IdentityProvider, NoteApi, NoteInput};
pub use workflow::{storage_key, NoteWorkflow};
