//! Incremental parser for OpenAI-compatible `text/event-stream` responses.
//!
//! Bytes are fed as they arrive from the transport; complete lines are turned
//! into [`StreamEvent`]s and the unterminated tail is carried over to the next
//! call. The carry buffer holds raw bytes so multi-byte characters split across
//! chunks decode correctly.

use serde::Deserialize;

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// One parsed event, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental fragment of translated text.
    Delta(String),
    /// The `[DONE]` sentinel was seen.
    Done,
    /// A `data:` payload that was not valid JSON.
    ParseWarning(String),
}

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Default)]
pub struct ChunkParser {
    carry: Vec<u8>,
    done: bool,
}

impl ChunkParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the sentinel was seen or [`finish`](Self::finish) was called.
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Feeds a raw chunk and returns the events for every line it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.done {
            return events;
        }

        self.carry.extend_from_slice(chunk);

        while let Some(line_end) = self.carry.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.carry.drain(..=line_end).collect();
            self.process_line(&line, &mut events);
            if self.done {
                self.carry.clear();
                break;
            }
        }

        events
    }

    /// Flushes an unterminated trailing line. Later calls return nothing.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if !self.done {
            let line = std::mem::take(&mut self.carry);
            self.process_line(&line, &mut events);
        }
        self.done = true;
        self.carry.clear();
        events
    }

    fn process_line(&mut self, raw: &[u8], events: &mut Vec<StreamEvent>) {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();

        // Comments, `event:` and `id:` fields carry nothing we render
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = payload.trim_start();
        if payload.is_empty() {
            return;
        }

        if payload == DONE_SENTINEL {
            self.done = true;
            events.push(StreamEvent::Done);
            return;
        }

        match parse_delta(payload) {
            Ok(Some(content)) => events.push(StreamEvent::Delta(content)),
            Ok(None) => {}
            Err(_) => events.push(StreamEvent::ParseWarning(payload.to_string())),
        }
    }
}

/// Extracts `choices[0].delta.content`, ignoring empty fragments.
fn parse_delta(payload: &str) -> serde_json::Result<Option<String>> {
    let chunk = serde_json::from_str::<StreamChunk>(payload)?;

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty()))
}
