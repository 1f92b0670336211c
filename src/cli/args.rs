use clap::{Parser, Subcommand};

use crate::config::ResolveOptions;

#[derive(Parser, Debug)]
#[command(name = "quicklingo")]
#[command(about = "Streaming translation through OpenAI-compatible chat APIs")]
#[command(version)]
pub struct Args {
    /// File containing the text to translate (reads from stdin if not provided)
    pub file: Option<String>,

    #[command(flatten)]
    pub translate: TranslateFlags,

    /// Suppress the spinner and status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by one-shot and interactive translation.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TranslateFlags {
    /// Target language code (ISO 639-1, e.g., zh, ja, en)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Chat-completions API URL
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Wait for the full response instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl From<&TranslateFlags> for ResolveOptions {
    fn from(flags: &TranslateFlags) -> Self {
        Self {
            api_url: flags.url.clone(),
            model: flags.model.clone(),
            to: flags.to.clone(),
            no_stream: flags.no_stream,
            timeout_secs: flags.timeout,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate line after line in an interactive prompt
    Chat {
        #[command(flatten)]
        translate: TranslateFlags,
    },
    /// Edit the configuration file
    Configure {
        /// Show the current configuration instead of editing it
        #[arg(long)]
        show: bool,
    },
    /// List supported language codes
    Languages,
}
