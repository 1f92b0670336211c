//! Terminal rendering of translation updates.
//!
//! Partial messages carry the whole translation so far; the panel writes only
//! the part that is new since the last update. If an update does not extend
//! what is already on screen, the full text is printed again on a fresh line.

use std::io::{self, Write};

use super::{Spinner, Style};
use crate::output;
use crate::translation::{CANCELLED_MESSAGE, MessageKind, Sink, SinkMessage, TIMED_OUT_MESSAGE};

pub struct TerminalPanel<W: Write = io::Stdout> {
    out: W,
    spinner: Option<Spinner>,
    shown: String,
}

impl TerminalPanel<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPanel<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            spinner: None,
            shown: String::new(),
        }
    }

    /// Text rendered for the translation in progress.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn show_loading(&mut self, message: &str) {
        if output::is_quiet() {
            return;
        }
        match &self.spinner {
            Some(spinner) => spinner.set_message(message),
            None => self.spinner = Some(Spinner::new(message)),
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }

    fn render(&mut self, text: &str) -> io::Result<()> {
        if let Some(suffix) = text.strip_prefix(self.shown.as_str()) {
            self.out.write_all(suffix.as_bytes())?;
        } else {
            writeln!(self.out)?;
            self.out.write_all(text.as_bytes())?;
        }
        self.shown.clear();
        self.shown.push_str(text);
        self.out.flush()
    }

    fn complete(&mut self, text: &str) -> io::Result<()> {
        self.render(text)?;
        if !self.shown.is_empty() {
            writeln!(self.out)?;
        }
        self.shown.clear();
        self.out.flush()
    }

    fn fail(&mut self, text: &str) -> io::Result<()> {
        if !self.shown.is_empty() {
            writeln!(self.out)?;
            self.out.flush()?;
            self.shown.clear();
        }

        let styled = if text == CANCELLED_MESSAGE || text == TIMED_OUT_MESSAGE {
            Style::notice(text)
        } else {
            Style::error(text)
        };
        eprintln!("{styled}");
        Ok(())
    }
}

impl<W: Write> Sink for TerminalPanel<W> {
    fn post(&mut self, message: SinkMessage) {
        if message.kind != MessageKind::Loading {
            self.stop_spinner();
        }

        let result = match message.kind {
            MessageKind::Loading => {
                self.show_loading(&message.text);
                Ok(())
            }
            MessageKind::Partial => self.render(&message.text),
            MessageKind::Complete => self.complete(&message.text),
            MessageKind::Error => self.fail(&message.text),
        };

        if let Err(err) = result {
            tracing::warn!("failed to write translation output: {err}");
        }
    }
}
