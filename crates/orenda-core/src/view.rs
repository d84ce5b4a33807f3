//! Transcript view abstraction.

/// Rendering surface for a conversation or journey transcript.
///
/// Agent messages are streamed: `begin_agent_message`, then one
/// `push_agent_char` per revealed character, then `end_agent_message`.
pub trait TranscriptView: Send {
    /// Appends a user message in full.
    fn user_message(&mut self, text: &str);

    /// Starts a new agent message, optionally attributed to a named speaker.
    fn begin_agent_message(&mut self, speaker: Option<&str>);

    /// Reveals the next character of the current agent message.
    fn push_agent_char(&mut self, c: char);

    /// Finishes the current agent message.
    fn end_agent_message(&mut self);

    /// Offers a set of selectable replies.
    fn show_choices(&mut self, choices: &[String]);

    /// Shows the "thinking" indicator, with an optional breathing prompt.
    fn show_indicator(&mut self, prompt: Option<&str>);

    /// Hides the indicator.
    fn clear_indicator(&mut self);

    /// Enables or disables user input.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Shows an out-of-band notice (headings, confirmations).
    fn notice(&mut self, text: &str);
}
