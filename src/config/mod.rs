mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_API_URL, DEFAULT_MODEL,
    DEFAULT_TARGET_LANGUAGE, DEFAULT_TIMEOUT_SECS, ResolveOptions, ResolvedConfig, Settings,
    resolve_config,
};
