// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{BlobStore, IdentityProvider, NoteApi, NoteInput};
use crate::domain::{DomainError, Note};

// Common test environment variables
pub const TEST_ENV_VARS: &[&str] = &["RUST_LOG", "NO_CLEANUP"];

/// A remote call observed by the mock backend, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    CurrentUser,
    ListNotes,
    CreateNote { name: String, image: Option<String> },
    DeleteNote { id: String },
    BlobPut { key: String, len: usize },
    BlobUrl { key: String },
    BlobRemove { key: String },
}

/// Shared, cloneable record of every call the mock backend received.
///
/// Ordering properties (upload strictly before creation, blob removal
/// skipped for image-less notes) are asserted against this log.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<RemoteCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    /// Position of the first call matching the predicate.
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&RemoteCall) -> bool,
    {
        self.calls().iter().position(predicate)
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&RemoteCall) -> bool,
    {
        self.calls().iter().filter(|call| predicate(*call)).count()
    }
}

/// Mock identity provider with a fixed outcome per construction.
#[derive(Clone)]
pub struct MockIdentityProvider {
    user: Option<String>,
    fail: bool,
    log: CallLog,
}

impl MockIdentityProvider {
    pub fn signed_in(user: &str, log: CallLog) -> Self {
        Self {
            user: Some(user.to_string()),
            fail: false,
            log,
        }
    }

    pub fn signed_out(log: CallLog) -> Self {
        Self {
            user: None,
            fail: false,
            log,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            user: None,
            fail: true,
            log,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current_user(&self) -> Result<Option<String>, DomainError> {
        self.log.record(RemoteCall::CurrentUser);
        if self.fail {
            return Err(DomainError::IdentityLookup(
                "identity provider unreachable".to_string(),
            ));
        }
        Ok(self.user.clone())
    }
}

/// In-memory fake of the note API, shared behind `Clone`.
///
/// Seeded notes are returned in insertion order; created notes are
/// appended with a generated id and the configured owner, so a refetch
/// after create observes them the way the remote collection would.
///
/// # Examples
///
/// ```
/// use cloudnotes::util::testing::{remote_note, CallLog, MockNoteApi};
///
/// let log = CallLog::new();
/// let api = MockNoteApi::builder(log.clone())
///     .with_owner("u1")
///     .with_note(remote_note("1", "u1", "A", "d", None))
///     .build();
/// ```
#[derive(Clone)]
pub struct MockNoteApi {
    state: Arc<Mutex<MockApiState>>,
    log: CallLog,
}

struct MockApiState {
    notes: Vec<Note>,
    next_id: u64,
    owner: Option<String>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
}

impl MockNoteApi {
    pub fn builder(log: CallLog) -> MockNoteApiBuilder {
        MockNoteApiBuilder {
            notes: Vec::new(),
            owner: None,
            fail_list: false,
            fail_create: false,
            fail_delete: false,
            log,
        }
    }

    /// Add a note to the remote collection, as if another client wrote it.
    pub fn push_note(&self, note: Note) {
        self.state
            .lock()
            .expect("mock state poisoned")
            .notes
            .push(note);
    }

    pub fn set_list_failure(&self, fail: bool) {
        self.state.lock().expect("mock state poisoned").fail_list = fail;
    }
}

#[async_trait]
impl NoteApi for MockNoteApi {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.log.record(RemoteCall::ListNotes);
        let state = self.state.lock().expect("mock state poisoned");
        if state.fail_list {
            return Err(DomainError::Api("list failed".to_string()));
        }
        Ok(state.notes.clone())
    }

    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError> {
        self.log.record(RemoteCall::CreateNote {
            name: input.name.clone(),
            image: input.image.clone(),
        });
        let mut state = self.state.lock().expect("mock state poisoned");
        if state.fail_create {
            return Err(DomainError::Api("create failed".to_string()));
        }
        let note = Note {
            id: format!("note-{}", state.next_id),
            owner: state.owner.clone(),
            name: input.name,
            description: input.description,
            image: input.image,
            image_display_url: None,
        };
        state.next_id += 1;
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        self.log.record(RemoteCall::DeleteNote { id: id.to_string() });
        let mut state = self.state.lock().expect("mock state poisoned");
        if state.fail_delete {
            return Err(DomainError::Api("delete failed".to_string()));
        }
        state.notes.retain(|note| note.id != id);
        Ok(())
    }
}

/// Builder for MockNoteApi
pub struct MockNoteApiBuilder {
    notes: Vec<Note>,
    owner: Option<String>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
    log: CallLog,
}

impl MockNoteApiBuilder {
    /// Seed the remote collection with a note.
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Owner assigned to notes created through the mock.
    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn with_create_failure(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn with_delete_failure(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn build(self) -> MockNoteApi {
        MockNoteApi {
            state: Arc::new(Mutex::new(MockApiState {
                notes: self.notes,
                next_id: 1,
                owner: self.owner,
                fail_list: self.fail_list,
                fail_create: self.fail_create,
                fail_delete: self.fail_delete,
            })),
            log: self.log,
        }
    }
}

/// Mock blob store.
///
/// Resolves URLs as `https://cdn.test/{key}` unless a specific URL was
/// configured; uploads and removals only record their call.
#[derive(Clone)]
pub struct MockBlobStore {
    urls: HashMap<String, String>,
    fail_put: bool,
    fail_url_for: Option<String>,
    fail_remove: bool,
    log: CallLog,
}

impl MockBlobStore {
    pub fn builder(log: CallLog) -> MockBlobStoreBuilder {
        MockBlobStoreBuilder {
            urls: HashMap::new(),
            fail_put: false,
            fail_url_for: None,
            fail_remove: false,
            log,
        }
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), DomainError> {
        self.log.record(RemoteCall::BlobPut {
            key: key.to_string(),
            len: bytes.len(),
        });
        if self.fail_put {
            return Err(DomainError::BlobStore("upload failed".to_string()));
        }
        Ok(())
    }

    async fn get_url(&self, key: &str) -> Result<String, DomainError> {
        self.log.record(RemoteCall::BlobUrl {
            key: key.to_string(),
        });
        if self.fail_url_for.as_deref() == Some(key) {
            return Err(DomainError::BlobStore(format!("No such object: {key}")));
        }
        Ok(self
            .urls
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("https://cdn.test/{key}")))
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.log.record(RemoteCall::BlobRemove {
            key: key.to_string(),
        });
        if self.fail_remove {
            return Err(DomainError::BlobStore("remove failed".to_string()));
        }
        Ok(())
    }
}

/// Builder for MockBlobStore
pub struct MockBlobStoreBuilder {
    urls: HashMap<String, String>,
    fail_put: bool,
    fail_url_for: Option<String>,
    fail_remove: bool,
    log: CallLog,
}

impl MockBlobStoreBuilder {
    /// Configure the URL resolved for a specific key.
    pub fn with_url(mut self, key: &str, url: &str) -> Self {
        self.urls.insert(key.to_string(), url.to_string());
        self
    }

    pub fn with_put_failure(mut self) -> Self {
        self.fail_put = true;
        self
    }

    /// Fail URL resolution for one specific key.
    pub fn with_url_failure(mut self, key: &str) -> Self {
        self.fail_url_for = Some(key.to_string());
        self
    }

    pub fn with_remove_failure(mut self) -> Self {
        self.fail_remove = true;
        self
    }

    pub fn build(self) -> MockBlobStore {
        MockBlobStore {
            urls: self.urls,
            fail_put: self.fail_put,
            fail_url_for: self.fail_url_for,
            fail_remove: self.fail_remove,
            log: self.log,
        }
    }
}

/// A note as the API would return it from a fetch.
pub fn remote_note(
    id: &str,
    owner: &str,
    name: &str,
    description: &str,
    image: Option<&str>,
) -> Note {
    Note {
        id: id.to_string(),
        owner: Some(owner.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        image: image.map(str::to_string),
        image_display_url: None,
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "want"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

pub fn print_active_env_vars() {
    for var in TEST_ENV_VARS {
        if let Ok(value) = env::var(var) {
            println!("{var}={value}");
        } else {
            println!("{var} is not set");
        }
    }
}
