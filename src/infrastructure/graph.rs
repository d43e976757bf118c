// src/infrastructure/graph.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

use crate::application::{NoteApi, NoteInput};
use crate::domain::{DomainError, Note};

// Operation documents for the managed note API.
const LIST_NOTES_QUERY: &str = "\
query ListNotes {
  listNotes {
    items { id owner name description image }
  }
}";

const CREATE_NOTE_MUTATION: &str = "\
mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) { id owner name description image }
}";

const DELETE_NOTE_MUTATION: &str = "\
mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) { id }
}";

/// Client for the graph-style note API: JSON query/mutation posts with
/// bearer-token auth, all scoped to the calling user's credentials.
pub struct GraphClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl GraphClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    async fn post(&self, query: &str, variables: Value) -> Result<Value, DomainError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| DomainError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Api(format!(
                "Request failed with status {status}"
            )));
        }

        let envelope: GraphResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Api(e.to_string()))?;
        if let Some(first) = envelope.errors.unwrap_or_default().into_iter().next() {
            return Err(DomainError::Api(first.message));
        }
        envelope
            .data
            .ok_or_else(|| DomainError::Api("Response carried no data".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorEntry {
    message: String,
}

/// Wire form of a note record. Kept private to this adapter so that
/// derived view state on the domain type never leaks into requests.
#[derive(Debug, Deserialize)]
struct NoteRecord {
    id: String,
    owner: Option<String>,
    name: String,
    description: String,
    image: Option<String>,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Note {
            id: record.id,
            owner: record.owner,
            name: record.name,
            description: record.description,
            image: record.image,
            image_display_url: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListNotesData {
    #[serde(rename = "listNotes")]
    list_notes: ListNotesConnection,
}

#[derive(Debug, Deserialize)]
struct ListNotesConnection {
    items: Vec<NoteRecord>,
}

#[derive(Debug, Deserialize)]
struct CreateNoteData {
    #[serde(rename = "createNote")]
    create_note: NoteRecord,
}

#[async_trait]
impl NoteApi for GraphClient {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let data = self.post(LIST_NOTES_QUERY, json!({})).await?;
        let parsed: ListNotesData =
            serde_json::from_value(data).map_err(|e| DomainError::Api(e.to_string()))?;
        Ok(parsed
            .list_notes
            .items
            .into_iter()
            .map(Note::from)
            .collect())
    }

    #[instrument(level = "debug", skip(self, input), fields(name = %input.name))]
    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError> {
        let mut record = json!({
            "name": input.name,
            "description": input.description,
        });
        if let Some(image) = &input.image {
            record["image"] = json!(image);
        }
        let data = self
            .post(CREATE_NOTE_MUTATION, json!({ "input": record }))
            .await?;
        let parsed: CreateNoteData =
            serde_json::from_value(data).map_err(|e| DomainError::Api(e.to_string()))?;
        Ok(parsed.create_note.into())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        self.post(DELETE_NOTE_MUTATION, json!({ "input": { "id": id } }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_list_response_when_deserializing_then_maps_all_fields() {
        // Arrange
        let data = json!({
            "listNotes": {
                "items": [
                    { "id": "1", "owner": "u1", "name": "A", "description": "d", "image": "u1-1cat.png" },
                    { "id": "2", "owner": null, "name": "B", "description": "e", "image": null }
                ]
            }
        });

        // Act
        let parsed: ListNotesData = serde_json::from_value(data).expect("should deserialize");
        let notes: Vec<Note> = parsed.list_notes.items.into_iter().map(Note::from).collect();

        // Assert
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "1");
        assert_eq!(notes[0].owner.as_deref(), Some("u1"));
        assert_eq!(notes[0].image.as_deref(), Some("u1-1cat.png"));
        assert_eq!(notes[0].image_display_url, None);
        assert_eq!(notes[1].image, None);
    }

    #[test]
    fn given_error_envelope_when_deserializing_then_exposes_message() {
        // Arrange
        let raw = r#"{ "data": null, "errors": [{ "message": "Not Authorized" }] }"#;

        // Act
        let envelope: GraphResponse = serde_json::from_str(raw).expect("should deserialize");

        // Assert
        assert!(envelope.data.as_ref().map_or(true, Value::is_null));
        assert_eq!(envelope.errors.unwrap()[0].message, "Not Authorized");
    }
}
