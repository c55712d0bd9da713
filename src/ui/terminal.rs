//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::prompts::{confirm_suffix, prompt_confirm};
use super::{
    should_use_colors, NonInteractiveUI, OutputMode, PitchTheme, ProgressSpinner, SpinnerHandle,
    UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: PitchTheme,
    mode: OutputMode,
    assume_yes: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    ///
    /// With `assume_yes`, every confirmation answers yes without reading input.
    pub fn new(mode: OutputMode, assume_yes: bool) -> Self {
        let theme = if should_use_colors() {
            PitchTheme::new()
        } else {
            PitchTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            assume_yes,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        let stderr = Term::stderr();
        writeln!(&stderr, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_step(current, total, name)).ok();
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if self.assume_yes {
            writeln!(self.term, "{} {} yes", question, confirm_suffix(default)).ok();
            return Ok(true);
        }
        prompt_confirm(question, default, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.term.is_term() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            if self.mode.shows_status() {
                writeln!(self.term, "  {}", message).ok();
            }
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Create the UI for this run.
pub fn create_ui(interactive: bool, mode: OutputMode, assume_yes: bool) -> Box<dyn UserInterface> {
    if interactive {
        Box::new(TerminalUI::new(mode, assume_yes))
    } else {
        Box::new(NonInteractiveUI::new(mode, assume_yes))
    }
}
