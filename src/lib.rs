// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::application::NoteWorkflow;
use crate::cli::args::{Args, Command};
use crate::domain::{Attachment, DomainError, NoteDraft};
use crate::infrastructure::{Config, GraphClient, HttpBlobStore, HttpIdentityProvider};
use crate::ports::TextPresenter;

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting cloudnotes with arguments");

    // Initialize infrastructure
    let config = Config::resolve(args.config.as_deref())?;
    let identity = HttpIdentityProvider::new(&config.identity.url, &config.auth.token);
    let api = GraphClient::new(&config.api.url, &config.auth.token);
    let blobs = HttpBlobStore::new(&config.storage.url, &config.auth.token);

    // Initialize application
    let mut workflow = NoteWorkflow::new(identity, api, blobs);

    // Initialize presentation
    let presenter = TextPresenter::new();

    // Execute use case
    match args.command {
        Command::List { json } => {
            workflow.initialize().await?;
            if json {
                println!("{}", presenter.render_json(workflow.notes())?);
            } else {
                print!("{}", presenter.render_list(workflow.notes()));
            }
        }
        Command::Create {
            name,
            description,
            image,
        } => {
            workflow.resolve_identity().await?;
            let attachment = match image {
                Some(path) => Some(read_attachment(&path)?),
                None => None,
            };
            let draft = NoteDraft {
                name,
                description,
                attachment,
            };
            workflow.create_note(draft).await?;
            info!("Note created");
            print!("{}", presenter.render_list(workflow.notes()));
        }
        Command::Delete { note_id } => {
            // The image key comes from the fetched list, matched by id.
            workflow.fetch_notes().await?;
            let image = workflow
                .notes()
                .iter()
                .find(|note| note.id == note_id)
                .map(|note| note.image.clone())
                .ok_or_else(|| DomainError::NoteNotFound(note_id.clone()))?;
            workflow.delete_note(&note_id, image.as_deref()).await?;
            print!("{}", presenter.render_list(workflow.notes()));
        }
        Command::Whoami => {
            workflow.resolve_identity().await?;
            match workflow.current_user() {
                Some(user) => println!("{user}"),
                None => println!("Not signed in"),
            }
        }
    }

    Ok(())
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("Image path has no usable file name")?
        .to_string();
    Ok(Attachment { file_name, bytes })
}
