//! agrichat-cli: terminal client for the AgriChat HTTP API
//!
//! # Subcommands
//! - `languages`                                   — list supported language codes
//! - `start -l <code>`                             — open a chat session
//! - `ask -s <session> -l <code> <question>`       — ask a question
//! - `history <session> [--json]`                  — show a session's messages
//! - `status`                                      — show backend and store status

use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "agrichat-cli", version, about = "AgriChat — multilingual farming advice from the terminal")]
struct Cli {
    /// AgriChat HTTP server URL (overrides AGRICHAT_HTTP_URL env var)
    #[arg(long, env = "AGRICHAT_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List supported language codes
    Languages,

    /// Start a new chat session
    Start {
        /// Language code, e.g. en, hi, ta
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Ask a question within a session
    Ask {
        /// Session id returned by `start`
        #[arg(short, long)]
        session: String,

        #[arg(short, long, default_value = "en")]
        language: String,

        /// Question text
        question: String,
    },

    /// Show the messages of a session
    History {
        session: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show backend and document store status
    Status,
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// A single stored message from `GET /chat/{session_id}`
#[derive(Debug, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
    pub language: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryMessage>,
}

// ============================================================================
// Formatting
// ============================================================================

/// One line per message: `[time] role (lang): content`.
pub fn format_message(m: &HistoryMessage) -> String {
    let time = m
        .created_at
        .as_deref()
        .map(|t| t.chars().take(19).collect::<String>().replace('T', " "))
        .unwrap_or_else(|| "-".to_string());
    match m.language.as_deref() {
        Some(lang) => format!("[{}] {} ({}): {}", time, m.role, lang, m.content),
        None => format!("[{}] {}: {}", time, m.role, m.content),
    }
}

/// Pull the error text out of an API error body, falling back to the raw body.
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["detail"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn client() -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// Send a request and decode a successful JSON body; exits on transport or HTTP errors.
fn send<T: serde::de::DeserializeOwned>(req: reqwest::blocking::RequestBuilder, url: &str) -> anyhow::Result<T> {
    let resp = match req.send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("agrichat-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        eprintln!("agrichat-cli: server returned {}: {}", status, error_detail(&body));
        std::process::exit(1);
    }

    Ok(resp.json()?)
}

fn do_languages(server: &str) -> anyhow::Result<()> {
    let url = format!("{}/languages", server);
    let resp: LanguagesResponse = send(client()?.get(&url), &url)?;
    println!("{}", resp.languages.join(" "));
    Ok(())
}

fn do_start(server: &str, language: &str) -> anyhow::Result<()> {
    let url = format!("{}/chat/start", server);
    let body = serde_json::json!({ "language": language });
    let resp: StartResponse = send(client()?.post(&url).json(&body), &url)?;
    println!("{}", resp.session_id);
    Ok(())
}

fn do_ask(server: &str, session: &str, language: &str, question: &str) -> anyhow::Result<()> {
    let url = format!("{}/chat/ask", server);
    let body = serde_json::json!({
        "session_id": session,
        "language": language,
        "question": question,
    });
    let resp: AskResponse = send(client()?.post(&url).json(&body), &url)?;
    println!("{}", resp.answer);
    Ok(())
}

fn do_history(server: &str, session: &str, json_output: bool) -> anyhow::Result<()> {
    let url = format!("{}/chat/{}", server, session);
    let raw: serde_json::Value = send(client()?.get(&url), &url)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let history: HistoryResponse = serde_json::from_value(raw)?;
    if history.messages.is_empty() {
        eprintln!("No messages for session: {}", session);
        return Ok(());
    }
    for m in &history.messages {
        println!("{}", format_message(m));
    }
    Ok(())
}

fn do_status(server: &str) -> anyhow::Result<()> {
    let url = format!("{}/test", server);
    let body: serde_json::Value = send(client()?.get(&url), &url)?;

    println!("Backend:      {}", body["backend"].as_str().unwrap_or("?"));
    println!("Database:     {}", body["database"].as_str().unwrap_or("?"));
    println!("DB URL:       {}", body["database_url"].as_str().unwrap_or("-"));
    println!("DB name:      {}", body["database_name"].as_str().unwrap_or("-"));
    println!("Connection:   {}", body["connection_status"].as_str().unwrap_or("?"));
    if let Some(collections) = body["collections"].as_array() {
        let names: Vec<&str> = collections.iter().filter_map(|c| c.as_str()).collect();
        println!("Collections:  {}", names.join(", "));
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Languages => do_languages(&server),
        Commands::Start { language } => do_start(&server, &language),
        Commands::Ask { session, language, question } => do_ask(&server, &session, &language, &question),
        Commands::History { session, json } => do_history(&server, &session, json),
        Commands::Status => do_status(&server),
    };

    if let Err(e) = result {
        eprintln!("agrichat-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
