//! Where translation updates are rendered.

/// What a [`SinkMessage`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Loading,
    /// Cumulative text so far.
    Partial,
    /// Final translated text.
    Complete,
    /// User-facing failure, cancellation or timeout message.
    Error,
}

impl MessageKind {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl SinkMessage {
    pub fn loading(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Loading)
    }

    pub fn partial(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Partial)
    }

    pub fn complete(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Complete)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Error)
    }

    fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Receives the updates of one translation at a time.
///
/// A translation posts any number of loading/partial messages followed by
/// exactly one terminal message. A sink may be reused for the next translation
/// once the terminal message has been posted.
pub trait Sink {
    fn post(&mut self, message: SinkMessage);
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn post(&mut self, message: SinkMessage) {
        (**self).post(message);
    }
}

/// Holds the single open panel.
///
/// The slot is the only owner: revealing an open panel reuses it, and
/// [`dispose`](Self::dispose) drops it so the next reveal creates a new one.
#[derive(Debug)]
pub struct PanelSlot<S> {
    panel: Option<S>,
}

impl<S> Default for PanelSlot<S> {
    fn default() -> Self {
        Self { panel: None }
    }
}

impl<S> PanelSlot<S> {
    pub const fn new() -> Self {
        Self { panel: None }
    }

    /// Returns the open panel, creating it with `create` if there is none.
    pub fn create_or_reveal(&mut self, create: impl FnOnce() -> S) -> &mut S {
        self.panel.get_or_insert_with(create)
    }

    /// Closes the panel, handing it back to the caller.
    pub const fn dispose(&mut self) -> Option<S> {
        self.panel.take()
    }

    pub const fn is_open(&self) -> bool {
        self.panel.is_some()
    }
}
