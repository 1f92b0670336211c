//! Drives one request from send to terminal outcome.
//!
//! [`StreamOrchestrator::execute`] yields cumulative partial translations and
//! ends with exactly one [`Progress::Finished`]. Cancellation is raced against
//! every transport suspension point; when it wins, the in-flight request and
//! body stream are dropped, which aborts them.

use futures_util::{Stream, StreamExt};
use serde::Deserialize;

use super::cancel::{CancelCause, CancellationHandle};
use super::error::{TranslateError, TransportError};
use super::outcome::TranslationOutcome;
use super::request::TranslationRequest;
use super::sse_parser::{ChunkParser, StreamEvent};
use super::transport::{ByteStream, Transport};

/// An item produced while a translation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Everything translated so far, not just the latest fragment.
    Partial(String),
    /// The terminal outcome. Always the last item.
    Finished(TranslationOutcome),
}

/// Non-streaming response body.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

enum Step<T> {
    Aborted,
    Ready(T),
}

pub struct StreamOrchestrator<T> {
    transport: T,
}

impl<T: Transport> StreamOrchestrator<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Runs `request` and reports progress until a terminal outcome.
    pub fn execute<'a>(
        &'a self,
        request: &'a TranslationRequest,
        cancel: &'a CancellationHandle,
    ) -> impl Stream<Item = Progress> + Send + 'a {
        async_stream::stream! {
            let sent = tokio::select! {
                biased;
                () = cancel.fired() => Step::Aborted,
                sent = self.transport.send(request) => Step::Ready(sent),
            };

            let mut body = match sent {
                Step::Aborted => {
                    yield Progress::Finished(cancelled_outcome(cancel));
                    return;
                }
                Step::Ready(Err(err)) => {
                    yield Progress::Finished(transport_failure(cancel, err));
                    return;
                }
                Step::Ready(Ok(body)) => body,
            };

            if !request.streaming() {
                let outcome = match read_to_end(&mut body, cancel).await {
                    Ok(Some(bytes)) => parse_completion(&bytes),
                    Ok(None) => cancelled_outcome(cancel),
                    Err(err) => transport_failure(cancel, err),
                };
                yield Progress::Finished(outcome);
                return;
            }

            let mut parser = ChunkParser::new();
            let mut full_text = String::new();

            loop {
                let next = tokio::select! {
                    biased;
                    () = cancel.fired() => Step::Aborted,
                    next = body.next() => Step::Ready(next),
                };

                let (events, ended) = match next {
                    Step::Aborted => {
                        yield Progress::Finished(cancelled_outcome(cancel));
                        return;
                    }
                    Step::Ready(Some(Ok(chunk))) => (parser.feed(&chunk), false),
                    Step::Ready(Some(Err(err))) => {
                        yield Progress::Finished(transport_failure(cancel, err));
                        return;
                    }
                    Step::Ready(None) => (parser.finish(), true),
                };

                let mut done = ended;
                for event in events {
                    match event {
                        StreamEvent::Delta(fragment) => {
                            full_text.push_str(&fragment);
                            yield Progress::Partial(full_text.clone());
                        }
                        StreamEvent::Done => done = true,
                        StreamEvent::ParseWarning(raw) => {
                            tracing::debug!(payload = %raw, "skipping malformed stream line");
                        }
                    }
                }

                if done {
                    // Anything the server sends after the sentinel is discarded with `body`
                    drop(body);
                    yield Progress::Finished(TranslationOutcome::Success(full_text));
                    return;
                }
            }
        }
    }
}

/// Collects a buffered body. `Ok(None)` means cancellation fired first.
async fn read_to_end(
    body: &mut ByteStream,
    cancel: &CancellationHandle,
) -> Result<Option<Vec<u8>>, TransportError> {
    let mut buffer = Vec::new();
    loop {
        let next = tokio::select! {
            biased;
            () = cancel.fired() => return Ok(None),
            next = body.next() => next,
        };
        match next {
            Some(chunk) => buffer.extend_from_slice(&chunk?),
            None => return Ok(Some(buffer)),
        }
    }
}

fn parse_completion(bytes: &[u8]) -> TranslationOutcome {
    match serde_json::from_slice::<CompletionResponse>(bytes) {
        Ok(response) => {
            let text = response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message)
                .and_then(|message| message.content)
                .unwrap_or_default();
            TranslationOutcome::Success(text)
        }
        Err(err) => TranslateError::from(err).into(),
    }
}

fn cancelled_outcome(cancel: &CancellationHandle) -> TranslationOutcome {
    match cancel.cause() {
        Some(CancelCause::Deadline) => TranslationOutcome::TimedOut,
        // `fired()` only completes once a source is set; treat anything else as a user cancel
        Some(CancelCause::User) | None => TranslationOutcome::Cancelled,
    }
}

/// A transport error caused by the abort itself is reported as the abort.
fn transport_failure(cancel: &CancellationHandle, err: TransportError) -> TranslationOutcome {
    match cancel.cause() {
        Some(CancelCause::Deadline) => TranslationOutcome::TimedOut,
        Some(CancelCause::User) => TranslationOutcome::Cancelled,
        None => TranslateError::from(err).into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::error::ErrorKind;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"你好"}}]}"#;
        assert_eq!(
            parse_completion(body.as_bytes()),
            TranslationOutcome::Success("你好".to_string())
        );
    }

    #[test]
    fn test_parse_completion_without_content() {
        assert_eq!(
            parse_completion(br#"{"choices":[]}"#),
            TranslationOutcome::Success(String::new())
        );
        assert_eq!(
            parse_completion(br#"{"choices":[{"message":{"content":null}}]}"#),
            TranslationOutcome::Success(String::new())
        );
    }

    #[test]
    fn test_parse_completion_malformed() {
        let outcome = parse_completion(b"<html>bad gateway</html>");
        assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
    }
}
