// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (list, create, delete, or whoami)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes with owner, name, and description
    List {
        /// Output notes as JSON instead of text rows
        #[arg(long)]
        json: bool,
    },

    /// Create a note, optionally attaching an image
    Create {
        /// Note name
        #[arg(value_name = "NAME")]
        name: String,

        /// Note description
        #[arg(value_name = "DESCRIPTION")]
        description: String,

        /// Path to an image file to upload with the note
        #[arg(short, long, value_name = "IMAGE")]
        image: Option<PathBuf>,
    },

    /// Delete a note and its stored image
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Show the signed-in user
    Whoami,
}
