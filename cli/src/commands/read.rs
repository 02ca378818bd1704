//! READ command - Retrieve a note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{HumanReadable, NoteView, make_request, note_url, output};

/// Arguments for the read command.
#[derive(Args)]
pub struct ReadArgs {
    /// Note ID to read
    pub note_id: String,
}

impl HumanReadable for NoteView {
    fn print_human(&self) {
        println!("{}", "Note".green().bold());
        println!("{}", "=".repeat(80));
        self.print_details();
    }
}

/// Execute the read command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ReadArgs,
) -> Result<()> {
    let url = note_url(base_url, &args.note_id)?;

    let response: NoteView = make_request(client.get(url)).await?;

    output(&response, human)
}
