//! Terminal rendering of the transcript.

use std::io::Write;

use orenda_core::view::TranscriptView;
use tracing::debug;

/// Erases the current line and returns the cursor to column 0.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Renders the transcript as plain lines on a writer.
///
/// Write errors are logged and dropped; a broken terminal must not take the
/// session down with it.
#[derive(Debug)]
pub struct TerminalView<W: Write + Send> {
    out: W,
    indicator_shown: bool,
}

impl<W: Write + Send> TerminalView<W> {
    /// Creates a view over `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            indicator_shown: false,
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            debug!(error = %e, "terminal write failed");
        }
    }
}

impl TerminalView<std::io::Stdout> {
    /// A view over standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TranscriptView for TerminalView<W> {
    fn user_message(&mut self, text: &str) {
        self.emit(&format!("you: {text}\n"));
    }

    fn begin_agent_message(&mut self, speaker: Option<&str>) {
        if let Some(speaker) = speaker {
            self.emit(&format!("{speaker}: "));
        }
    }

    fn push_agent_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.emit(c.encode_utf8(&mut buf));
    }

    fn end_agent_message(&mut self) {
        self.emit("\n");
    }

    fn show_choices(&mut self, choices: &[String]) {
        let mut text = String::new();
        for (i, choice) in choices.iter().enumerate() {
            text.push_str(&format!("  {}) {choice}\n", i + 1));
        }
        self.emit(&text);
    }

    fn show_indicator(&mut self, prompt: Option<&str>) {
        self.indicator_shown = true;
        match prompt {
            Some(prompt) => self.emit(&format!("  . . .  {prompt}")),
            None => self.emit("  . . ."),
        }
    }

    fn clear_indicator(&mut self) {
        if self.indicator_shown {
            self.indicator_shown = false;
            self.emit(CLEAR_LINE);
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled {
            self.emit("> ");
        }
    }

    fn notice(&mut self, text: &str) {
        self.emit(&format!("\n  {text}\n\n"));
    }
}
