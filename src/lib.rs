//! # atomlens
//!
//! Search client and snippet sanitizer for a knowledge-management backend.
//!
//! Atomlens talks to a backend that ingests messages, classifies them as
//! signal or noise, and extracts knowledge atoms (problems, solutions,
//! decisions, …). It queries the backend's full-text-search endpoint and
//! renders the `<mark>`-delimited snippets it returns — after sanitizing
//! them, since snippets are emitted as markup and must never carry foreign
//! tags.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐
//! │ Backend  │──▶│  client  │──▶│ sanitize  │──▶│  render  │
//! │ FTS API  │   │ reqwest  │   │ mark lexer│   │ ANSI/txt │
//! └──────────┘   └──────────┘   └───────────┘   └────┬─────┘
//!                                                    │
//!                                               ┌────▼─────┐
//!                                               │   CLI    │
//!                                               │ (alens)  │
//!                                               └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! alens search "deploy failure"        # query the backend
//! alens search "retro" --scope atoms   # only knowledge atoms
//! alens live                           # debounced interactive search
//! alens sanitize "<mark>hi</mark>"     # run the sanitizer standalone
//! alens health                         # backend health check
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Backend response data types |
//! | [`sanitize`] | Snippet sanitizer and highlight-segment parser |
//! | [`render`] | Terminal rendering of highlighted snippets |
//! | [`client`] | HTTP client for the backend API |
//! | [`search`] | Search and health CLI commands |
//! | [`live`] | Debounced interactive search |

pub mod client;
pub mod config;
pub mod live;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod search;
