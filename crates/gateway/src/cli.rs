//! CLI surface: argument parsing, config loading, and the one-shot `run`
//! command used for scripting and quick checks without the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use ck_concierge::SessionContext;
use ck_domain::config::Config;

use crate::bootstrap;

/// concierge-kiosk — the AI hotel check-in backend.
#[derive(Debug, Parser)]
#[command(name = "concierge-kiosk", version, about)]
pub struct Cli {
    /// Path to the config file (default: config.toml, falling back to
    /// built-in defaults when the file is absent).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the kiosk backend server (default when no subcommand is given).
    Serve,
    /// Send a single guest message to the concierge and print the reply.
    Run {
        /// The message to send.
        message: String,
        /// Session id (defaults to "cli-run").
        #[arg(long, default_value = "cli-run")]
        session: String,
        /// Output the full outcome (reply + actions) as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print version information.
    Version,
}

/// Load the configuration, tolerating a missing file (defaults apply —
/// the kiosk boots with mock data and canned replies out of the box).
pub fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let path = path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file found, using defaults");
        return Ok(Config::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Execute a single concierge turn and print the result.
pub async fn run(
    config: Arc<Config>,
    message: String,
    session: String,
    json_output: bool,
) -> anyhow::Result<()> {
    let state = bootstrap::build_app_state(config);
    let outcome = state
        .engine
        .chat(&message, &session, &SessionContext::default())
        .await;

    if json_output {
        let v = serde_json::json!({
            "reply": outcome.reply,
            "actions": outcome.actions,
            "sessionId": session,
        });
        println!("{}", serde_json::to_string_pretty(&v)?);
    } else {
        println!("{}", outcome.reply);
        for action in &outcome.actions {
            eprintln!("[action] {}", serde_json::to_string(action)?);
        }
    }

    Ok(())
}
