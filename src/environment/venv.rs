//! Python virtual environments as the isolated-environment backend.

use std::path::{Path, PathBuf};

use crate::error::{PitchError, Result};
use crate::requirements::CapabilityProbe;
use crate::shell::{shell_quote, CommandOptions, CommandRunner};

use super::builder::IsolatedEnvironment;

/// Creates environments with `<interpreter> -m venv` and installs with pip.
pub struct VenvBackend<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn CapabilityProbe,
    interpreter: String,
    capture: bool,
}

impl<'a> VenvBackend<'a> {
    /// Create a backend pinned to `interpreter` (e.g. `python3.11`).
    pub fn new(
        runner: &'a dyn CommandRunner,
        probe: &'a dyn CapabilityProbe,
        interpreter: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            probe,
            interpreter: interpreter.into(),
            capture: true,
        }
    }

    /// Stream child output to the terminal instead of capturing it.
    pub fn with_live_output(mut self, live: bool) -> Self {
        self.capture = !live;
        self
    }

    fn run(&self, path: &Path, command: &str) -> Result<()> {
        let options = CommandOptions {
            capture_stdout: self.capture,
            capture_stderr: self.capture,
            ..Default::default()
        };
        let result = self.runner.run(command, &options)?;
        if result.success {
            Ok(())
        } else {
            let tail = result.tail(5);
            let message = if tail.is_empty() {
                format!("`{}` exited with {:?}", command, result.exit_code)
            } else {
                format!("`{}` exited with {:?}: {}", command, result.exit_code, tail)
            };
            Err(PitchError::EnvironmentBuild {
                path: path.to_path_buf(),
                message,
            })
        }
    }
}

/// Interpreter inside a virtual environment.
pub fn environment_python(path: &Path) -> PathBuf {
    if cfg!(windows) {
        path.join("Scripts").join("python.exe")
    } else {
        path.join("bin").join("python")
    }
}

/// pip inside a virtual environment. Present only once creation finished.
pub fn environment_pip(path: &Path) -> PathBuf {
    if cfg!(windows) {
        path.join("Scripts").join("pip.exe")
    } else {
        path.join("bin").join("pip")
    }
}

/// Shell command that activates the environment.
pub fn activation_command(path: &Path) -> String {
    if cfg!(windows) {
        path.join("Scripts").join("activate").display().to_string()
    } else {
        format!(
            "source {}",
            shell_quote(&path.join("bin").join("activate").display().to_string())
        )
    }
}

impl IsolatedEnvironment for VenvBackend<'_> {
    fn is_complete(&self, path: &Path) -> bool {
        path.join("pyvenv.cfg").is_file() && environment_pip(path).is_file()
    }

    fn create(&self, path: &Path) -> Result<()> {
        if !self.probe.exists(&self.interpreter) {
            return Err(PitchError::ToolMissing {
                tool: self.interpreter.clone(),
                hint: "install the pinned Python interpreter or change environment.python_version"
                    .to_string(),
            });
        }

        let target = shell_quote(&path.display().to_string());
        let python = shell_quote(&environment_python(path).display().to_string());
        self.run(path, &format!("{} -m venv {}", self.interpreter, target))?;
        self.run(path, &format!("{} -m pip install --upgrade pip", python))
    }

    fn install(&self, path: &Path, dependencies: &[String]) -> Result<()> {
        let python = shell_quote(&environment_python(path).display().to_string());
        let specs: Vec<String> = dependencies.iter().map(|d| shell_quote(d)).collect();
        self.run(
            path,
            &format!("{} -m pip install {}", python, specs.join(" ")),
        )
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::requirements::FakeProbe;
    use crate::shell::RecordingRunner;

    #[test]
    fn create_runs_venv_then_pip_upgrade() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::with(&["python3.11"]);
        let backend = VenvBackend::new(&runner, &probe, "python3.11");

        backend.create(Path::new("/srv/app/.venv")).unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "python3.11 -m venv /srv/app/.venv".to_string(),
                "/srv/app/.venv/bin/python -m pip install --upgrade pip".to_string(),
            ]
        );
    }

    #[test]
    fn create_without_interpreter_is_tool_missing() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::with(&["python3"]);
        let backend = VenvBackend::new(&runner, &probe, "python3.12");

        let err = backend.create(Path::new("/tmp/env")).unwrap_err();

        assert!(matches!(err, PitchError::ToolMissing { ref tool, .. } if tool == "python3.12"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn install_is_single_batch_with_quoting() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::default();
        let backend = VenvBackend::new(&runner, &probe, "python3");

        backend
            .install(
                Path::new("/srv/env"),
                &["flask==3.0.2".to_string(), "requests>=2.31".to_string()],
            )
            .unwrap();

        assert_eq!(
            runner.commands(),
            vec!["/srv/env/bin/python -m pip install flask==3.0.2 'requests>=2.31'".to_string()]
        );
    }

    #[test]
    fn failed_command_becomes_environment_build_error() {
        let runner = RecordingRunner::new();
        runner.fail_when("-m venv", 1);
        let probe = FakeProbe::with(&["python3"]);
        let backend = VenvBackend::new(&runner, &probe, "python3");

        let err = backend.create(Path::new("/srv/env")).unwrap_err();
        assert!(matches!(err, PitchError::EnvironmentBuild { .. }));
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn complete_only_with_config_and_pip() {
        let temp = tempfile::TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let probe = FakeProbe::default();
        let backend = VenvBackend::new(&runner, &probe, "python3");

        std::fs::create_dir_all(temp.path().join("bin")).unwrap();
        std::fs::write(temp.path().join("pyvenv.cfg"), "home = /usr/bin\n").unwrap();
        assert!(!backend.is_complete(temp.path()));

        std::fs::write(temp.path().join("bin/pip"), "").unwrap();
        assert!(backend.is_complete(temp.path()));
    }

    #[test]
    fn activation_command_sources_bin_activate() {
        assert_eq!(
            activation_command(Path::new("/srv/env")),
            "source /srv/env/bin/activate"
        );
    }
}
