//! UPDATE command - Replace a note's title and content.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, NoteBody, make_request, note_url, output};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Note ID to update
    pub note_id: String,

    /// New title
    pub title: String,

    /// New content
    pub content: String,
}

/// Response from updating a note.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateNoteResponse {
    pub message: String,
}

impl HumanReadable for UpdateNoteResponse {
    fn print_human(&self) {
        println!("{}", "Note updated successfully!".green().bold());
    }
}

/// Execute the update command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: UpdateArgs,
) -> Result<()> {
    let url = note_url(base_url, &args.note_id)?;
    let body = NoteBody {
        title: &args.title,
        content: &args.content,
    };

    let response: UpdateNoteResponse = make_request(client.put(url).json(&body)).await?;

    output(&response, human)
}
