use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::validate_language;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TARGET_LANGUAGE: &str = "zh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable consulted when `api_key_env` is not configured.
pub const DEFAULT_API_KEY_ENV: &str = "QUICKLINGO_API_KEY";

/// Settings in the `[quicklingo]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Full chat-completions URL.
    pub api_url: Option<String>,
    /// Model name sent with every request.
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    /// Whether responses are streamed.
    pub streaming: Option<bool>,
    /// Request deadline in seconds.
    pub timeout_secs: Option<u64>,
    /// Default target language (ISO 639-1 code).
    pub to: Option<String>,
}

impl Settings {
    /// Gets the API key, preferring the environment variable over the config file.
    ///
    /// Empty values are treated as missing.
    pub fn get_api_key(&self) -> Option<String> {
        let env_var = self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        if let Ok(key) = std::env::var(env_var)
            && !key.trim().is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.trim().is_empty())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/quicklingo/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub quicklingo: Settings,
}

/// Configuration handed to the translation core.
///
/// `credential` and `endpoint` stay optional here: their absence is reported by the
/// coordinator as a configuration failure rather than rejected up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub credential: Option<String>,
    pub endpoint: Option<String>,
    pub model: String,
    pub streaming: bool,
    pub timeout: Duration,
    /// ISO 639-1 target language code.
    pub target_language: String,
}

impl ResolvedConfig {
    /// Returns `true` when both the credential and the endpoint are present.
    pub fn is_complete(&self) -> bool {
        let present =
            |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.credential) && present(&self.endpoint)
    }
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub to: Option<String>,
    pub no_stream: bool,
    pub timeout_secs: Option<u64>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// # Errors
///
/// Returns an error if the target language is not supported.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let settings = &config_file.quicklingo;

    let endpoint = options
        .api_url
        .clone()
        .or_else(|| settings.api_url.clone())
        .or_else(|| Some(DEFAULT_API_URL.to_string()))
        .filter(|url| !url.trim().is_empty());

    let model = options
        .model
        .clone()
        .or_else(|| settings.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let target_language = options
        .to
        .clone()
        .or_else(|| settings.to.clone())
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
    validate_language(&target_language)?;

    let streaming = !options.no_stream && settings.streaming.unwrap_or(true);

    let timeout_secs = options
        .timeout_secs
        .or(settings.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ResolvedConfig {
        credential: settings.get_api_key(),
        endpoint,
        model,
        streaming,
        timeout: Duration::from_secs(timeout_secs),
        target_language,
    })
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/quicklingo/config.toml`
    /// or `~/.config/quicklingo/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, falling back to defaults when it is missing.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
