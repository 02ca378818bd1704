//! LIST command - List the notes owned by this device.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{
    HumanReadable, NoteView, format_timestamp, make_request, notes_url, output, truncate,
};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    // No additional arguments needed
}

/// Response from listing notes: a bare JSON array.
#[derive(Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ListNotesResponse {
    pub notes: Vec<NoteView>,
}

impl HumanReadable for ListNotesResponse {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "No notes yet.".dimmed());
            return;
        }

        for note in &self.notes {
            println!(
                "  {} {}",
                note.note_id.cyan(),
                truncate(&note.title, 40).bold()
            );
            println!(
                "    {} {}",
                "Updated:".dimmed(),
                format_timestamp(&note.updated_at)
            );
            println!("    {}", truncate(note.content.lines().next().unwrap_or(""), 70));
            println!();
        }

        println!("{} {}", "Total:".cyan(), self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    _args: ListArgs,
) -> Result<()> {
    let url = notes_url(base_url)?;

    let response: ListNotesResponse = make_request(client.get(url)).await?;

    output(&response, human)
}
