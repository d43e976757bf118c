// src/application/workflow.rs
use futures_util::future::try_join_all;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::application::{BlobStore, IdentityProvider, NoteApi, NoteInput};
use crate::constants::STORAGE_KEY_TOKEN_SPACE;
use crate::domain::{DomainError, Note, NoteDraft};

/// Keeps an in-memory note list in step with the remote collection.
///
/// Owns the three external collaborators plus the synchronized state.
/// Operations either replace the list wholesale (fetch), refetch after a
/// remote mutation (create), or filter it optimistically (delete); the
/// list is never edited in place partway through an operation.
pub struct NoteWorkflow<I, A, B> {
    identity: I,
    api: A,
    blobs: B,
    notes: Vec<Note>,
    current_user: Option<String>,
}

impl<I, A, B> NoteWorkflow<I, A, B>
where
    I: IdentityProvider,
    A: NoteApi,
    B: BlobStore,
{
    pub fn new(identity: I, api: A, blobs: B) -> Self {
        Self {
            identity,
            api,
            blobs,
            notes: Vec::new(),
            current_user: None,
        }
    }

    /// Notes as of the last synchronization point.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Resolve identity and fetch the collection in one pass.
    ///
    /// The two calls are independent: a failed identity lookup leaves
    /// `current_user` unset (and note creation disabled) but does not
    /// abort the fetch.
    pub async fn initialize(&mut self) -> Result<(), DomainError> {
        if let Err(error) = self.resolve_identity().await {
            warn!(%error, "Identity lookup failed; note creation stays disabled");
        }
        self.fetch_notes().await
    }

    /// Ask the identity provider for the current user.
    ///
    /// `current_user` stays unset when nobody is signed in or the lookup
    /// fails; there is no automatic re-poll.
    pub async fn resolve_identity(&mut self) -> Result<(), DomainError> {
        self.current_user = self.identity.current_user().await?;
        debug!(user = ?self.current_user, "Resolved identity");
        Ok(())
    }

    /// Replace the local list with the remote collection.
    ///
    /// Every note carrying an image key gets a display URL resolved from
    /// the blob store. The resolutions run as one concurrent join: the
    /// first failure fails the whole fetch and the previous list stays in
    /// place. Notes without an image pass through unchanged, and the API
    /// ordering is preserved.
    pub async fn fetch_notes(&mut self) -> Result<(), DomainError> {
        let fetched = self.api.list_notes().await?;
        let blobs = &self.blobs;
        let resolved = try_join_all(fetched.into_iter().map(|mut note| async move {
            if let Some(key) = note.image.clone() {
                note.image_display_url = Some(blobs.get_url(&key).await?);
            }
            Ok::<_, DomainError>(note)
        }))
        .await?;
        info!(count = resolved.len(), "Fetched notes");
        self.notes = resolved;
        Ok(())
    }

    /// Upload the attachment (if any), submit the creation, then refetch
    /// so the list carries the API-assigned `id` and `owner`.
    ///
    /// The upload strictly precedes the creation call. A creation failure
    /// after a successful upload leaves the blob orphaned; nothing cleans
    /// that up here.
    pub async fn create_note(&mut self, draft: NoteDraft) -> Result<(), DomainError> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::InvalidDraft("name must not be empty".into()));
        }
        if draft.description.trim().is_empty() {
            return Err(DomainError::InvalidDraft(
                "description must not be empty".into(),
            ));
        }
        let user = self
            .current_user
            .clone()
            .ok_or(DomainError::IdentityUnresolved)?;

        let image = match draft.attachment {
            Some(attachment) => {
                let key = storage_key(&user, &attachment.file_name);
                debug!(%key, bytes = attachment.bytes.len(), "Uploading attachment");
                self.blobs.put(&key, attachment.bytes).await?;
                Some(key)
            }
            None => None,
        };

        let input = NoteInput {
            name: draft.name,
            description: draft.description,
            image,
        };
        self.api.create_note(input).await?;
        self.fetch_notes().await
    }

    /// Remove the note locally first, then its blob (when present), then
    /// the remote record, strictly in that order.
    ///
    /// The local removal is optimistic: it happens before any remote call
    /// and is never rolled back, even when a remote step fails.
    pub async fn delete_note(
        &mut self,
        id: &str,
        image: Option<&str>,
    ) -> Result<(), DomainError> {
        self.notes.retain(|note| note.id != id);
        if let Some(key) = image {
            self.blobs.remove(key).await?;
        }
        self.api.delete_note(id).await?;
        info!(%id, "Deleted note");
        Ok(())
    }
}

/// Synthesize a blob key for an upload: the owner's username, a random
/// numeric token, and the original file name.
///
/// The username namespaces keys across users; the token keeps same-name
/// uploads by the same user apart.
pub fn storage_key(user: &str, file_name: &str) -> String {
    let token = rand::thread_rng().gen_range(0..STORAGE_KEY_TOKEN_SPACE);
    format!("{user}-{token}{file_name}")
}
