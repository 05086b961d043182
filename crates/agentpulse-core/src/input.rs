//! Chat input field
//!
//! ```text
//! Idle (empty) ──type──► Editable ──submit──► Submitting ──reply──► Idle
//! ```
//!
//! Typing stays possible while a request is in flight; only submission is
//! blocked.

/// Suggested prompts offered under the input box
pub const PREMADE_PROMPTS: [&str; 2] = ["What actions can you take?", "Deploy an NFT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    Idle,
    Editable,
    Submitting,
}

/// What pressing Enter did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterAction {
    /// A literal newline was inserted
    Newline,
    /// The raw text was taken for submission
    Submit(String),
    /// Nothing to submit (blank input or request pending)
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatInput {
    text: String,
    pending: bool,
}

impl ChatInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phase(&self) -> InputPhase {
        if self.pending {
            InputPhase::Submitting
        } else if self.text.is_empty() {
            InputPhase::Idle
        } else {
            InputPhase::Editable
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Send control state: enabled once the text holds a letter and nothing is in flight.
    pub fn send_enabled(&self) -> bool {
        !self.pending && self.text.chars().any(|c| c.is_ascii_alphabetic())
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn insert_newline(&mut self) {
        self.text.push('\n');
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Replace the whole text (premade prompts)
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Take the raw text for submission and clear the field.
    ///
    /// Returns `None` when the trimmed text is empty or a request is pending;
    /// the field is left untouched in that case.
    pub fn take_submission(&mut self) -> Option<String> {
        if self.pending || self.text.trim().is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.text))
    }

    /// Enter without modifier submits; with a modifier it inserts a newline.
    pub fn on_enter(&mut self, with_modifier: bool) -> EnterAction {
        if with_modifier {
            self.insert_newline();
            return EnterAction::Newline;
        }
        match self.take_submission() {
            Some(text) => EnterAction::Submit(text),
            None => EnterAction::Ignored,
        }
    }

    pub(crate) fn mark_pending(&mut self) {
        self.pending = true;
    }

    pub(crate) fn finish(&mut self) {
        self.pending = false;
    }
}
