//! Command implementations for the notes CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;

use anyhow::Result;
use chrono::NaiveDateTime;
use colored::Colorize;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// Header carrying the caller's device id.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// A note as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct NoteView {
    pub note_id: String,
    pub device_id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteView {
    /// Print the note with its metadata.
    pub fn print_details(&self) {
        println!("  {} {}", "ID:".cyan(), self.note_id);
        println!("  {} {}", "Title:".cyan(), self.title.bold());
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created_at));
        println!("  {} {}", "Updated:".cyan(), format_timestamp(&self.updated_at));
        println!();
        for line in self.content.lines() {
            println!("  {}", line);
        }
    }
}

/// Title and content for create and update requests.
#[derive(Debug, Serialize)]
pub struct NoteBody<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Build an HTTP client that sends the device id with every request.
pub fn build_client(device_id: &str) -> Result<reqwest::Client> {
    let device_id = device_id.trim();
    if device_id.is_empty() {
        anyhow::bail!("Device ID is required");
    }

    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(device_id)
        .map_err(|e| anyhow::anyhow!("Invalid device id value: {}", e))?;
    headers.insert(HeaderName::from_static(DEVICE_ID_HEADER), value);

    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}

/// URL of the notes collection under `base_url`.
pub fn notes_url(base_url: &str) -> Result<reqwest::Url> {
    resource_url(base_url, &[])
}

/// URL of one note. The id is percent-encoded as a single path segment.
pub fn note_url(base_url: &str, note_id: &str) -> Result<reqwest::Url> {
    resource_url(base_url, &[note_id])
}

fn resource_url(base_url: &str, extra: &[&str]) -> Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(base_url)
        .map_err(|e| anyhow::anyhow!("Invalid server URL {:?}: {}", base_url, e))?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Invalid server URL {:?}: cannot hold a path", base_url))?
        .pop_if_empty()
        .push("notes")
        .extend(extra);
    Ok(url)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Make an HTTP request and decode the JSON response.
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = send(request).await?;
    Ok(response.json::<T>().await?)
}

/// Make an HTTP request whose success carries no body.
pub async fn make_empty_request(request: reqwest::RequestBuilder) -> Result<(), CliError> {
    send(request).await.map(|_| ())
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull the `error` field out of an error body, or return the body as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(|v| v.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Format a server timestamp for human display.
///
/// Unparseable values are shown unchanged.
pub fn format_timestamp(ts: &str) -> String {
    match ts.parse::<NaiveDateTime>() {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Err(_) => ts.to_string(),
    }
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-05-01T12:30:45.123456"),
            "2024-05-01 12:30:45 UTC"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer line of text", 10), "a longe...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"error":"Not found"}"#), "Not found");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"other":1}"#), r#"{"other":1}"#);
    }

    #[test]
    fn test_notes_url() {
        assert_eq!(
            notes_url("http://localhost:3000").unwrap().as_str(),
            "http://localhost:3000/notes"
        );
        assert_eq!(
            notes_url("https://api.example.com/prod/").unwrap().as_str(),
            "https://api.example.com/prod/notes"
        );
        assert!(notes_url("not a url").is_err());
    }

    #[test]
    fn test_note_url_encodes_id() {
        assert_eq!(
            note_url("http://localhost:3000", "abc-123").unwrap().as_str(),
            "http://localhost:3000/notes/abc-123"
        );
        assert_eq!(
            note_url("http://localhost:3000", "a/b?c#d").unwrap().as_str(),
            "http://localhost:3000/notes/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_build_client_requires_device_id() {
        assert!(build_client("   ").is_err());
        assert!(build_client("d1").is_ok());
    }
}
