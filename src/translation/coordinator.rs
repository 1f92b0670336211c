//! Entry point for one translation: validation, deadline, and sink updates.

use futures_util::StreamExt;
use std::pin::pin;

use super::cancel::{CancelTrigger, CancellationHandle};
use super::error::ErrorKind;
use super::orchestrator::{Progress, StreamOrchestrator};
use super::outcome::TranslationOutcome;
use super::request::TranslationRequest;
use super::sink::{Sink, SinkMessage};
use super::transport::Transport;
use crate::config::ResolvedConfig;

pub const LOADING_MESSAGE: &str = "Translating...";
pub const NOTHING_TO_TRANSLATE_MESSAGE: &str = "Nothing to translate.";
pub const CANCELLED_MESSAGE: &str = "Translation cancelled.";
pub const TIMED_OUT_MESSAGE: &str = "Translation timed out.";
pub const FAILED_MESSAGE: &str = "Translation failed, please try again later.";

pub struct TranslationCoordinator<T> {
    orchestrator: StreamOrchestrator<T>,
}

impl<T: Transport> TranslationCoordinator<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            orchestrator: StreamOrchestrator::new(transport),
        }
    }

    /// Translates `raw_selection`, posting progress to `sink`.
    ///
    /// The sink receives zero or more loading/partial messages and then exactly
    /// one terminal message. Every failure is reported through the returned
    /// outcome; nothing is raised to the caller.
    pub async fn translate<S: Sink + ?Sized>(
        &self,
        raw_selection: &str,
        sink: &mut S,
        config: &ResolvedConfig,
        cancel: &CancelTrigger,
    ) -> TranslationOutcome {
        let request = match TranslationRequest::build(raw_selection, config) {
            Ok(request) => request,
            Err(err) => {
                let outcome = TranslationOutcome::from(err);
                log_outcome(&outcome);
                sink.post(terminal_message(&outcome));
                return outcome;
            }
        };

        sink.post(SinkMessage::loading(LOADING_MESSAGE));

        let handle = CancellationHandle::new(cancel.clone(), config.timeout);
        let mut progress = pin!(self.orchestrator.execute(&request, &handle));

        while let Some(item) = progress.next().await {
            match item {
                Progress::Partial(text) => sink.post(SinkMessage::partial(text)),
                Progress::Finished(outcome) => {
                    log_outcome(&outcome);
                    sink.post(terminal_message(&outcome));
                    return outcome;
                }
            }
        }

        // The orchestrator always finishes with an outcome
        let outcome = TranslationOutcome::Failed {
            kind: ErrorKind::Network,
            message: "response ended without an outcome".to_string(),
        };
        log_outcome(&outcome);
        sink.post(terminal_message(&outcome));
        outcome
    }
}

/// Maps an outcome onto the single terminal sink message.
pub fn terminal_message(outcome: &TranslationOutcome) -> SinkMessage {
    match outcome {
        TranslationOutcome::Success(text) => SinkMessage::complete(text.clone()),
        TranslationOutcome::Cancelled => SinkMessage::error(CANCELLED_MESSAGE),
        TranslationOutcome::TimedOut => SinkMessage::error(TIMED_OUT_MESSAGE),
        TranslationOutcome::Failed { kind, message } => match kind {
            ErrorKind::Input => SinkMessage::error(NOTHING_TO_TRANSLATE_MESSAGE),
            ErrorKind::Config => SinkMessage::error(format!(
                "Invalid configuration: {message}. Check the API key and API URL settings."
            )),
            ErrorKind::Network => SinkMessage::error(FAILED_MESSAGE),
        },
    }
}

fn log_outcome(outcome: &TranslationOutcome) {
    match outcome {
        TranslationOutcome::Success(text) => {
            tracing::debug!(chars = text.chars().count(), "translation complete");
        }
        TranslationOutcome::Cancelled => tracing::info!("translation cancelled"),
        TranslationOutcome::TimedOut => tracing::info!("translation timed out"),
        TranslationOutcome::Failed {
            kind: ErrorKind::Input,
            message,
        } => {
            tracing::debug!("nothing to translate: {message}");
        }
        TranslationOutcome::Failed { kind, message } => {
            tracing::error!(%kind, "translation failed: {message}");
        }
    }
}
