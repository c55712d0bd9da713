//! Post-run operator instructions.

use crate::config::ProvisionConfig;
use crate::environment::activation_command;
use crate::registry::HostProfile;
use crate::shell::shell_quote;

/// Shown in place of a version that could not be determined.
const UNKNOWN_VERSION: &str = "unknown";

/// Snippet that prints the host's network addresses.
const ADDRESS_SNIPPET: &str = "hostname -I";

/// What the operator needs to start the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub app_name: String,
    pub version: String,
    pub activation: String,
    pub start_command: String,
    pub profile: HostProfile,
}

impl CompletionReport {
    /// Build the report. `forwarded` arguments are appended to the start
    /// command verbatim.
    pub fn new(
        config: &ProvisionConfig,
        profile: HostProfile,
        forwarded: &[String],
        version: String,
    ) -> Self {
        let mut start_command = config.start_command().to_string();
        for arg in forwarded {
            start_command.push(' ');
            start_command.push_str(&shell_quote(arg));
        }
        Self {
            app_name: config.app_name.clone(),
            version,
            activation: activation_command(&config.environment.path),
            start_command,
            profile,
        }
    }

    /// Version for display.
    pub fn display_version(&self) -> &str {
        if self.version.is_empty() {
            UNKNOWN_VERSION
        } else {
            &self.version
        }
    }

    /// Banner lines, first line is the headline.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} {} is ready.", self.app_name, self.display_version()),
            format!("Activate the environment:  {}", self.activation),
            format!("Start the application:     {}", self.start_command),
        ];
        if self.profile == HostProfile::Headless {
            lines.push(format!("Find this host's address:  {}", ADDRESS_SNIPPET));
            lines.push("Then connect from another machine on the same network.".to_string());
        }
        lines
    }
}
