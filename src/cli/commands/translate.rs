use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::input::InputReader;
use crate::translation::{
    CancelTrigger, ErrorKind, HttpTransport, Sink, TranslationCoordinator, TranslationOutcome,
    Transport,
};
use crate::ui::TerminalPanel;

pub struct TranslateOptions {
    pub file: Option<String>,
    pub resolve: ResolveOptions,
}

/// Translates a file or stdin into the terminal.
pub async fn run_translate(options: TranslateOptions) -> Result<TranslationOutcome> {
    let config = load_config(&options.resolve)?;
    let selection = InputReader::read(options.file.as_deref())?;

    let coordinator = TranslationCoordinator::new(HttpTransport::new());
    let mut panel = TerminalPanel::stdout();

    Ok(translate_interruptible(&coordinator, &selection, &mut panel, &config).await)
}

/// Loads the config file and applies CLI overrides.
pub fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    resolve_config(options, &config_file)
}

/// Runs one translation that Ctrl+C cancels.
pub async fn translate_interruptible<T, S>(
    coordinator: &TranslationCoordinator<T>,
    selection: &str,
    sink: &mut S,
    config: &ResolvedConfig,
) -> TranslationOutcome
where
    T: Transport,
    S: Sink + ?Sized,
{
    let trigger = CancelTrigger::new();
    let listener = {
        let trigger = trigger.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("interrupt received, cancelling translation");
                trigger.cancel();
            }
        })
    };

    let outcome = coordinator.translate(selection, sink, config, &trigger).await;
    listener.abort();
    outcome
}

/// Process exit status for an outcome.
pub const fn exit_code(outcome: &TranslationOutcome) -> exitcode::ExitCode {
    match outcome {
        TranslationOutcome::Success(_) => exitcode::OK,
        TranslationOutcome::Cancelled | TranslationOutcome::TimedOut => exitcode::TEMPFAIL,
        TranslationOutcome::Failed { kind, .. } => match kind {
            ErrorKind::Input => exitcode::DATAERR,
            ErrorKind::Config => exitcode::CONFIG,
            ErrorKind::Network => exitcode::UNAVAILABLE,
        },
    }
}
