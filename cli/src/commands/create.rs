//! CREATE command - Create a new note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, NoteBody, make_request, notes_url, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note title
    pub title: String,

    /// Note content
    pub content: String,
}

/// Response from creating a note.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateNoteResponse {
    pub note_id: String,
}

impl HumanReadable for CreateNoteResponse {
    fn print_human(&self) {
        println!("{}", "Note created successfully!".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.note_id);
    }
}

/// Execute the create command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: CreateArgs,
) -> Result<()> {
    let url = notes_url(base_url)?;
    let body = NoteBody {
        title: &args.title,
        content: &args.content,
    };

    let response: CreateNoteResponse = make_request(client.post(url).json(&body)).await?;

    output(&response, human)
}
