//! # atomlens CLI (`alens`)
//!
//! The `alens` binary is the terminal interface to the knowledge-management
//! backend: full-text search with highlighted snippets, a debounced
//! interactive mode, a standalone snippet sanitizer, and a health check.
//!
//! ## Usage
//!
//! ```bash
//! alens --config ./config/alens.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `alens search "<query>"` | Search topics, messages, and atoms |
//! | `alens live` | Debounced interactive search loop |
//! | `alens sanitize [SNIPPET]` | Sanitize a snippet (argument or stdin) |
//! | `alens health` | Backend health check |
//!
//! ## Examples
//!
//! ```bash
//! # Search everything
//! alens search "deployment rollback"
//!
//! # Only messages since a date
//! alens search "incident" --scope messages --since 2026-08-01
//!
//! # Pipe snippets through the sanitizer
//! echo "<script>x</script> <mark>safe</mark>" | alens sanitize
//! ```

mod client;
mod config;
mod live;
mod models;
mod render;
mod sanitize;
mod search;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// atomlens CLI — search client and snippet sanitizer for a
/// knowledge-management backend.
///
/// All commands except `sanitize` accept a `--config` flag pointing to a
/// TOML configuration file. See `config/alens.example.toml` for a full
/// example.
#[derive(Parser)]
#[command(
    name = "alens",
    about = "atomlens — search client and snippet sanitizer for a knowledge-management backend",
    version,
    long_about = "Atomlens queries a knowledge-management backend's full-text-search endpoint \
    and renders the <mark>-delimited snippets it returns, sanitizing them so that only \
    highlight markup survives into the output."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/alens.toml`. Backend URL, search defaults,
    /// and output settings are read from this file.
    #[arg(long, global = true, default_value = "./config/alens.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the knowledge base.
    ///
    /// Queries the backend's full-text-search endpoint and prints matched
    /// topics, messages, and knowledge atoms with sanitized, highlighted
    /// snippets.
    Search {
        /// The search query string.
        query: String,

        /// Result scope: `all`, `topics`, `messages`, or `atoms`.
        /// Defaults to the `search.scope` config value.
        #[arg(long)]
        scope: Option<String>,

        /// Only return messages sent on or after this date (YYYY-MM-DD).
        #[arg(long)]
        since: Option<String>,

        /// Maximum number of results per section.
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Debounced interactive search.
    ///
    /// Reads query lines from stdin and fires a search once the input has
    /// been quiet for `search.debounce_ms`. A blank line clears the pending
    /// query; Ctrl-D exits.
    Live,

    /// Sanitize a snippet and print the result.
    ///
    /// Runs the snippet sanitizer on the given argument, or on stdin when
    /// no argument is provided. Only `<mark>` tags survive; everything else
    /// is stripped or escaped. Needs no configuration file.
    Sanitize {
        /// Raw snippet text. Read from stdin when omitted.
        snippet: Option<String>,
    },

    /// Check backend health.
    ///
    /// Calls the backend's health endpoint and prints its status and
    /// version.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Sanitize { snippet } = &cli.command {
        let raw = match snippet {
            Some(s) => s.clone(),
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        println!("{}", sanitize::sanitize(raw.trim_end_matches('\n')));
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Search {
            query,
            scope,
            since,
            limit,
        } => {
            search::run_search(&cfg, &query, scope, since, limit).await?;
        }
        Commands::Live => {
            live::run_live(&cfg).await?;
        }
        Commands::Health => {
            search::run_health(&cfg).await?;
        }
        Commands::Sanitize { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
