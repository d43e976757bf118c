use cloudnotes::application::NoteWorkflow;
use cloudnotes::domain::Note;
use cloudnotes::util::testing::{
    CallLog, MockBlobStore, MockBlobStoreBuilder, MockIdentityProvider, MockNoteApi,
};

pub type TestWorkflow = NoteWorkflow<MockIdentityProvider, MockNoteApi, MockBlobStore>;

/// A complete fake backend wired to one shared call log.
///
/// The api handle stays accessible so tests can mutate the remote
/// collection behind the workflow's back.
#[allow(dead_code)]
pub struct Scenario {
    pub log: CallLog,
    pub api: MockNoteApi,
    pub workflow: TestWorkflow,
}

#[allow(dead_code)]
impl Scenario {
    /// Signed-in user with a seeded remote collection.
    pub fn signed_in(user: &str, notes: Vec<Note>) -> Self {
        Self::with_blobs(user, notes, |builder| builder)
    }

    /// Same, with extra blob-store configuration.
    pub fn with_blobs<F>(user: &str, notes: Vec<Note>, configure: F) -> Self
    where
        F: FnOnce(MockBlobStoreBuilder) -> MockBlobStoreBuilder,
    {
        let log = CallLog::new();
        let mut api_builder = MockNoteApi::builder(log.clone()).with_owner(user);
        for note in notes {
            api_builder = api_builder.with_note(note);
        }
        let api = api_builder.build();
        let blobs = configure(MockBlobStore::builder(log.clone())).build();
        let identity = MockIdentityProvider::signed_in(user, log.clone());
        let workflow = NoteWorkflow::new(identity, api.clone(), blobs);
        Scenario { log, api, workflow }
    }
}
