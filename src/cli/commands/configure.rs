//! Configure command handler for editing the config file.

use anyhow::Result;
use inquire::{Confirm, CustomType, Select, Text};

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_API_URL, DEFAULT_MODEL,
    DEFAULT_TARGET_LANGUAGE, DEFAULT_TIMEOUT_SECS, Settings,
};
use crate::translation::SUPPORTED_LANGUAGES;
use crate::ui::{Style, handle_prompt_cancellation};

pub fn run_configure(show: bool) -> Result<()> {
    if show {
        let manager = ConfigManager::new()?;
        let config = manager.load_or_default()?;
        print_settings(&manager, &config);
        return Ok(());
    }
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;
    let current = config.quicklingo.clone();

    let api_url = Text::new("API URL:")
        .with_default(current.api_url.as_deref().unwrap_or(DEFAULT_API_URL))
        .prompt()?;

    let model = Text::new("Model:")
        .with_default(current.model.as_deref().unwrap_or(DEFAULT_MODEL))
        .prompt()?;

    let api_key_env = Text::new("Environment variable holding the API key:")
        .with_default(current.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV))
        .prompt()?;

    let to = select_target_language(current.to.as_deref())?;

    let streaming = Confirm::new("Stream the translation as it arrives?")
        .with_default(current.streaming.unwrap_or(true))
        .prompt()?;

    let timeout_secs = CustomType::<u64>::new("Timeout (seconds):")
        .with_default(current.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
        .prompt()?;

    config.quicklingo = Settings {
        api_url: Some(api_url),
        model: Some(model),
        api_key: current.api_key,
        api_key_env: Some(api_key_env),
        streaming: Some(streaming),
        timeout_secs: Some(timeout_secs),
        to: Some(to),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let default = default.unwrap_or(DEFAULT_TARGET_LANGUAGE);
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code:6} {name}"))
        .collect();
    let cursor = SUPPORTED_LANGUAGES
        .iter()
        .position(|(code, _)| *code == default)
        .unwrap_or(0);

    let selected = Select::new("Target language:", options)
        .with_starting_cursor(cursor)
        .prompt()?;

    Ok(selected
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_TARGET_LANGUAGE)
        .to_string())
}

fn print_settings(manager: &ConfigManager, config: &ConfigFile) {
    let settings = &config.quicklingo;
    let not_set = || Style::secondary("(not set)");

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {}       {}",
        Style::label("api_url"),
        settings.api_url.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}         {}",
        Style::label("model"),
        settings.model.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("api_key"),
        settings
            .api_key
            .as_deref()
            .map_or_else(not_set, |key| Style::value(mask_key(key)))
    );
    println!(
        "  {}   {}",
        Style::label("api_key_env"),
        settings.api_key_env.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("streaming"),
        settings.streaming.map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("timeout_secs"),
        settings.timeout_secs.map_or_else(not_set, Style::value)
    );
    println!(
        "  {}            {}",
        Style::label("to"),
        settings.to.as_deref().map_or_else(not_set, Style::code)
    );
}

/// Keeps the first four characters of a key and hides the rest.
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}****")
}
