//! Non-interactive UI for CI/headless environments.

use crate::error::Result;

use super::prompts::confirm_suffix;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Never reads input: confirmations resolve to their default, or to yes
/// when `assume_yes` is set.
pub struct NonInteractiveUI {
    mode: OutputMode,
    assume_yes: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode, assume_yes: bool) -> Self {
        Self { mode, assume_yes }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str) {
        if self.mode.shows_status() {
            println!("[{}/{}] {}", current, total, name);
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let decision = self.assume_yes || default;
        if self.mode.shows_status() {
            println!(
                "{} {} {}",
                question,
                confirm_suffix(default),
                if decision { "yes" } else { "no" }
            );
        }
        Ok(decision)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner { quiet: !self.mode.shows_status() })
    }
}

/// Spinner stand-in that prints the final line only.
struct NoopSpinner {
    quiet: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        if !self.quiet {
            println!("  ✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }
}
