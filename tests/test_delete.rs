mod helpers;

use cloudnotes::domain::DomainError;
use cloudnotes::util::testing::{remote_note, RemoteCall};
use helpers::Scenario;

#[tokio::test]
async fn given_note_with_image_when_deleting_then_removes_blob_then_record() {
    // Arrange
    let mut scenario = Scenario::signed_in(
        "u1",
        vec![
            remote_note("1", "u1", "A", "d1", Some("k1")),
            remote_note("2", "u1", "B", "d2", None),
        ],
    );
    scenario.workflow.fetch_notes().await.unwrap();

    // Act
    scenario.workflow.delete_note("1", Some("k1")).await.unwrap();

    // Assert
    let ids: Vec<&str> = scenario
        .workflow
        .notes()
        .iter()
        .map(|note| note.id.as_str())
        .collect();
    assert_eq!(ids, vec!["2"]);

    let remove_at = scenario
        .log
        .position(|call| matches!(call, RemoteCall::BlobRemove { .. }))
        .unwrap();
    let delete_at = scenario
        .log
        .position(|call| {
            matches!(call, RemoteCall::DeleteNote { id } if id == "1")
        })
        .unwrap();
    assert!(remove_at < delete_at, "blob removal must precede the API deletion");

    // Only the deleted note's blob is touched.
    assert_eq!(
        scenario
            .log
            .count(|call| matches!(call, RemoteCall::BlobRemove { .. })),
        1
    );
    assert!(scenario.log.calls().contains(&RemoteCall::BlobRemove {
        key: "k1".to_string()
    }));
}

#[tokio::test]
async fn given_note_without_image_when_deleting_then_never_calls_blob_remove() {
    // Arrange
    let mut scenario =
        Scenario::signed_in("u1", vec![remote_note("2", "u1", "B", "d2", None)]);
    scenario.workflow.fetch_notes().await.unwrap();

    // Act
    scenario.workflow.delete_note("2", None).await.unwrap();

    // Assert
    assert!(scenario.workflow.notes().is_empty());
    assert_eq!(
        scenario
            .log
            .count(|call| matches!(call, RemoteCall::BlobRemove { .. })),
        0
    );
}

#[tokio::test]
async fn given_blob_removal_failure_when_deleting_then_local_removal_stands() {
    // Arrange
    let mut scenario = Scenario::with_blobs(
        "u1",
        vec![remote_note("1", "u1", "A", "d1", Some("k1"))],
        |blobs| blobs.with_remove_failure(),
    );
    scenario.workflow.fetch_notes().await.unwrap();

    // Act
    let result = scenario.workflow.delete_note("1", Some("k1")).await;

    // Assert
    assert!(matches!(result, Err(DomainError::BlobStore(_))));
    assert!(scenario.workflow.notes().is_empty());
    // The API deletion is never reached.
    assert_eq!(
        scenario
            .log
            .count(|call| matches!(call, RemoteCall::DeleteNote { .. })),
        0
    );
}

#[tokio::test]
async fn given_api_deletion_failure_when_deleting_then_local_removal_stands() {
    // Arrange
    let log = cloudnotes::util::testing::CallLog::new();
    let api = cloudnotes::util::testing::MockNoteApi::builder(log.clone())
        .with_owner("u1")
        .with_note(remote_note("1", "u1", "A", "d1", None))
        .with_delete_failure()
        .build();
    let blobs = cloudnotes::util::testing::MockBlobStore::builder(log.clone()).build();
    let identity = cloudnotes::util::testing::MockIdentityProvider::signed_in("u1", log.clone());
    let mut workflow = cloudnotes::application::NoteWorkflow::new(identity, api, blobs);
    workflow.fetch_notes().await.unwrap();

    // Act
    let result = workflow.delete_note("1", None).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Api(_))));
    assert!(workflow.notes().is_empty());
}
