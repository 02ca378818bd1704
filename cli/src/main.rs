//! Command-line client for the device-scoped notes API.
//!
//! Commands:
//! - create: Create a new note
//! - list: List the notes owned by this device
//! - read: Retrieve one note
//! - update: Replace a note's title and content
//! - delete: Delete a note
//!
//! Configuration via environment:
//! - NOTES_URL: Base URL of the notes server (default: http://localhost:3000)
//! - NOTES_DEVICE_ID: Device id sent as the `x-device-id` header

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    create::CreateArgs, delete::DeleteArgs, list::ListArgs, read::ReadArgs, update::UpdateArgs,
};

/// Device notes CLI
///
/// Manage the notes owned by one device. Prints JSON by default; pass
/// --human for formatted output.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes server URL
    #[arg(
        long,
        env = "NOTES_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// Device id identifying the note owner
    #[arg(long, env = "NOTES_DEVICE_ID", global = true)]
    device_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new note
    Create(CreateArgs),

    /// List this device's notes
    List(ListArgs),

    /// Read a note
    Read(ReadArgs),

    /// Replace a note's title and content
    Update(UpdateArgs),

    /// Delete a note
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client(&cli.device_id) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base_url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::Create(args) => {
            commands::create::execute(&client, base_url, cli.human, args).await
        }
        Commands::List(args) => commands::list::execute(&client, base_url, cli.human, args).await,
        Commands::Read(args) => commands::read::execute(&client, base_url, cli.human, args).await,
        Commands::Update(args) => {
            commands::update::execute(&client, base_url, cli.human, args).await
        }
        Commands::Delete(args) => {
            commands::delete::execute(&client, base_url, cli.human, args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
