//! Subcommand implementations.

/// Interactive translation prompt.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// One-shot translation of a file or stdin.
pub mod translate;
