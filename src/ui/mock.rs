//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmation answers are queued as raw
//! input lines and interpreted exactly like typed input.
//!
//! # Example
//!
//! ```
//! use pitch::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_answers(&["Y"]);
//!
//! assert!(ui.confirm("Upgrade system packages?", false).unwrap());
//! // Queue exhausted: the default applies.
//! assert!(!ui.confirm("Reboot now?", false).unwrap());
//! assert_eq!(ui.confirms().len(), 2);
//! ```

use std::collections::VecDeque;

use crate::error::Result;

use super::prompts::answer;
use super::{OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<(usize, usize, String)>,
    spinners: Vec<String>,
    answers: VecDeque<String>,
    confirms: Vec<(String, bool)>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Queue raw answer lines for upcoming confirmations, in order.
    pub fn queue_answers(&mut self, answers: &[&str]) {
        self.answers.extend(answers.iter().map(|s| s.to_string()));
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all announced steps as (current, total, name).
    pub fn steps(&self) -> &[(usize, usize, String)] {
        &self.steps
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all confirmations asked, as (question, default).
    pub fn confirms(&self) -> &[(String, bool)] {
        &self.confirms
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str) {
        self.steps.push((current, total, name.to_string()));
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.confirms.push((question.to_string(), default));
        let line = self.answers.pop_front().unwrap_or_default();
        Ok(answer(&line, default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(ProgressSpinner::hidden())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_no_with_empty_input_is_false() {
        let mut ui = MockUI::new();
        ui.queue_answers(&[""]);
        assert!(!ui.confirm("Proceed?", false).unwrap());
    }

    #[test]
    fn default_yes_with_empty_input_is_true() {
        let mut ui = MockUI::new();
        ui.queue_answers(&[""]);
        assert!(ui.confirm("Proceed?", true).unwrap());
    }

    #[test]
    fn yes_tokens_win_over_default() {
        let mut ui = MockUI::new();
        ui.queue_answers(&["Y", "yes", "YeS"]);
        assert!(ui.confirm("a", false).unwrap());
        assert!(ui.confirm("b", false).unwrap());
        assert!(ui.confirm("c", true).unwrap());
    }

    #[test]
    fn captures_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");
        ui.show_step(1, 3, "Install");

        assert!(ui.has_message("hello"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.steps()[0], (1, 3, "Install".to_string()));
    }
}
