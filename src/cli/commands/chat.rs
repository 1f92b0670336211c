use anyhow::Result;
use inquire::Text;

use super::translate::{load_config, translate_interruptible};
use crate::config::ResolveOptions;
use crate::translation::{HttpTransport, PanelSlot, TranslationCoordinator, language_name};
use crate::ui::{Style, TerminalPanel, is_prompt_cancelled};

const QUIT_COMMANDS: &[&str] = &["/quit", "/exit", "/q"];

/// Translates each entered line into one reused terminal panel.
pub async fn run_chat(options: ResolveOptions) -> Result<()> {
    let config = load_config(&options)?;

    if !config.is_complete() {
        crate::warn!(
            "API key or API URL is not configured; run 'quicklingo configure' to set them up"
        );
    }

    let target =
        language_name(&config.target_language).unwrap_or(config.target_language.as_str());
    crate::status!(
        "{} {} {}",
        Style::header("quicklingo"),
        Style::secondary(format!("{} ->", config.model)),
        Style::value(target)
    );
    crate::status!(
        "{}",
        Style::hint("Enter text to translate. Ctrl+C cancels a translation, /quit exits.")
    );

    let coordinator = TranslationCoordinator::new(HttpTransport::new());
    let mut panels = PanelSlot::new();

    loop {
        let line = match Text::new(">").prompt() {
            Ok(line) => line,
            Err(err) if is_prompt_cancelled(&err) => break,
            Err(err) => return Err(err.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&trimmed) {
            break;
        }

        let panel = panels.create_or_reveal(TerminalPanel::stdout);
        translate_interruptible(&coordinator, &line, panel, &config).await;
    }

    panels.dispose();
    Ok(())
}
