//! Recording command runner for tests.
//!
//! `RecordingRunner` implements [`CommandRunner`] without touching the host.
//! Every command line is captured in order, and commands can be made to
//! fail by substring.
//!
//! # Example
//!
//! ```
//! use pitch::shell::{CommandOptions, CommandRunner, RecordingRunner};
//!
//! let runner = RecordingRunner::new();
//! runner.fail_when("apt-get install", 100);
//!
//! let ok = runner.run("apt-get update", &CommandOptions::default()).unwrap();
//! let bad = runner.run("apt-get install -y git", &CommandOptions::default()).unwrap();
//!
//! assert!(ok.success);
//! assert_eq!(bad.exit_code, Some(100));
//! assert_eq!(runner.commands().len(), 2);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

use super::{CommandOptions, CommandResult, CommandRunner};

/// Command runner that records instead of executing.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<String>>,
    envs: RefCell<Vec<HashMap<String, String>>>,
    failures: RefCell<Vec<(String, i32)>>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any command containing `pattern` exit with `code`.
    pub fn fail_when(&self, pattern: &str, code: i32) {
        self.failures.borrow_mut().push((pattern.to_string(), code));
    }

    /// All command lines run so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Scoped environments passed with each command, in order.
    pub fn envs(&self) -> Vec<HashMap<String, String>> {
        self.envs.borrow().clone()
    }

    /// Whether any recorded command contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.commands.borrow().iter().any(|c| c.contains(needle))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        self.commands.borrow_mut().push(command.to_string());
        self.envs.borrow_mut().push(options.env.clone());

        let failure = self
            .failures
            .borrow()
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, code)| *code);

        Ok(match failure {
            Some(code) => CommandResult::failure(
                Some(code),
                String::new(),
                format!("{} failed", command),
                Duration::ZERO,
            ),
            None => CommandResult::success(String::new(), String::new(), Duration::ZERO),
        })
    }
}
