//! # quicklingo - streaming translation through chat-completion APIs
//!
//! `quicklingo` sends a block of text to an OpenAI-compatible chat-completions
//! endpoint and renders the translation as it streams in.
//!
//! The core lives in [`translation`]: a pure request builder, an incremental
//! SSE chunk parser, an orchestrator that races the response against a user
//! cancel trigger and a deadline, and a coordinator that reports progress to a
//! [`Sink`](translation::Sink) and always ends with exactly one
//! [`TranslationOutcome`](translation::TranslationOutcome).
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file
//! quicklingo ./notes.md
//!
//! # Translate from stdin into Japanese, without streaming
//! cat report.md | quicklingo --to ja --no-stream
//!
//! # Translate line after line
//! quicklingo chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/quicklingo/config.toml`:
//!
//! ```toml
//! [quicklingo]
//! api_url = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-4o"
//! api_key_env = "OPENAI_API_KEY"
//! streaming = true
//! timeout_secs = 60
//! to = "zh"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Reading the text to translate from files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style configuration paths.
pub mod paths;

/// Request building, stream parsing, orchestration and coordination.
pub mod translation;

/// Terminal UI components (panel, spinner, colors).
pub mod ui;
