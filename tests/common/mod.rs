#![allow(dead_code, clippy::unwrap_used)]
//! Test doubles shared by the integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::{FutureExt, StreamExt};

use quicklingo::config::ResolvedConfig;
use quicklingo::translation::{
    ByteStream, MessageKind, Sink, SinkMessage, TranslationRequest, Transport, TransportError,
};

/// One step of a scripted response body.
#[derive(Debug, Clone)]
pub enum Step {
    Chunk(String),
    Delay(Duration),
    Fail(String),
    /// Never yields again.
    Hang,
}

pub fn chunk(text: &str) -> Step {
    Step::Chunk(text.to_string())
}

pub fn delta_line(content: &str) -> String {
    format!("data: {}\n", serde_json::json!({"choices": [{"delta": {"content": content}}]}))
}

/// In-memory [`Transport`] replaying a fixed script.
pub struct ScriptedTransport {
    connect: Result<(), String>,
    connect_delay: Option<Duration>,
    steps: Vec<Step>,
    calls: AtomicUsize,
    last_request: Mutex<Option<TranslationRequest>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            connect: Ok(()),
            connect_delay: None,
            steps,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn refusing(message: &str) -> Self {
        Self {
            connect: Err(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TranslationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<ByteStream, TransportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let connect = self.connect.clone();
        let connect_delay = self.connect_delay;
        let steps = self.steps.clone();

        async move {
            if let Some(delay) = connect_delay {
                tokio::time::sleep(delay).await;
            }
            if let Err(message) = connect {
                return Err(TransportError::Stream(message));
            }

            let body = async_stream::stream! {
                for step in steps {
                    match step {
                        Step::Chunk(text) => yield Ok(Bytes::from(text)),
                        Step::Delay(delay) => tokio::time::sleep(delay).await,
                        Step::Fail(message) => yield Err(TransportError::Stream(message)),
                        Step::Hang => futures_util::future::pending::<()>().await,
                    }
                }
            };
            let body: ByteStream = body.boxed();
            Ok(body)
        }
        .boxed()
    }
}

/// Sink that records every message it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<SinkMessage>,
}

impl RecordingSink {
    pub fn partials(&self) -> Vec<&str> {
        self.texts_of(MessageKind::Partial)
    }

    pub fn terminals(&self) -> Vec<&SinkMessage> {
        self.messages.iter().filter(|m| m.kind.is_terminal()).collect()
    }

    pub fn texts_of(&self, kind: MessageKind) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.text.as_str())
            .collect()
    }

    /// Exactly one terminal message, and it is the last one.
    pub fn assert_single_terminal(&self) {
        assert_eq!(self.terminals().len(), 1, "messages: {:?}", self.messages);
        assert!(
            self.messages.last().unwrap().kind.is_terminal(),
            "messages: {:?}",
            self.messages
        );
    }
}

impl Sink for RecordingSink {
    fn post(&mut self, message: SinkMessage) {
        self.messages.push(message);
    }
}

pub fn config(streaming: bool) -> ResolvedConfig {
    ResolvedConfig {
        credential: Some("sk-test".to_string()),
        endpoint: Some("https://api.example.com/v1/chat/completions".to_string()),
        model: "gpt-4o".to_string(),
        streaming,
        timeout: Duration::from_secs(60),
        target_language: "zh".to_string(),
    }
}
