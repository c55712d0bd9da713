//! Idempotent isolated-environment builder.

use std::fs;
use std::path::Path;

use crate::error::{PitchError, Result};

use super::manifest::PackageManifest;

/// The isolated-environment technology, treated as two atomic operations.
pub trait IsolatedEnvironment {
    /// Whether `path` holds a fully created environment.
    fn is_complete(&self, path: &Path) -> bool;

    /// Materialize a fresh environment at `path`.
    fn create(&self, path: &Path) -> Result<()>;

    /// Install `dependencies` into the environment at `path` as one batch.
    fn install(&self, path: &Path, dependencies: &[String]) -> Result<()>;
}

/// What [`EnvironmentBuilder::ensure`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnsureOutcome {
    /// Whether the environment was created on this call.
    pub created: bool,
    /// Number of dependencies handed to the installer.
    pub installed: usize,
}

/// Creates the environment when absent, then installs the manifest into it.
pub struct EnvironmentBuilder<'a> {
    backend: &'a dyn IsolatedEnvironment,
}

impl<'a> EnvironmentBuilder<'a> {
    /// Create a builder over a backend.
    pub fn new(backend: &'a dyn IsolatedEnvironment) -> Self {
        Self { backend }
    }

    /// Ensure the environment at `path` exists and holds the manifest's
    /// application dependencies.
    ///
    /// Only a complete environment counts as already created; a leftover
    /// from an interrupted run is created over. A failed creation removes
    /// whatever it left at `path`, and fails louder if it cannot.
    pub fn ensure(&self, path: &Path, manifest: &PackageManifest) -> Result<EnsureOutcome> {
        let created = if self.backend.is_complete(path) {
            tracing::info!("reusing environment at {}", path.display());
            false
        } else {
            if path.exists() {
                tracing::warn!("{} holds an incomplete environment", path.display());
            }
            tracing::info!("creating environment at {}", path.display());
            if let Err(err) = self.backend.create(path) {
                discard_partial(path, &err)?;
                return Err(err);
            }
            true
        };

        let deps = &manifest.application_dependencies;
        if !deps.is_empty() {
            self.backend.install(path, deps)?;
        }

        Ok(EnsureOutcome {
            created,
            installed: deps.len(),
        })
    }
}

fn discard_partial(path: &Path, cause: &PitchError) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::warn!("removing partial environment at {}", path.display());
    fs::remove_dir_all(path).map_err(|err| PitchError::EnvironmentBuild {
        path: path.to_path_buf(),
        message: format!(
            "{}; the partial environment could not be removed ({}), delete it before re-running",
            cause, err
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PitchError;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Backend that materializes a directory and records calls.
    #[derive(Default)]
    struct FakeBackend {
        creates: RefCell<usize>,
        installs: RefCell<Vec<Vec<String>>>,
        fail_create_after_mkdir: bool,
        fail_install: bool,
    }

    impl IsolatedEnvironment for FakeBackend {
        fn is_complete(&self, path: &Path) -> bool {
            path.join("pyvenv.cfg").is_file()
        }

        fn create(&self, path: &Path) -> Result<()> {
            *self.creates.borrow_mut() += 1;
            fs::create_dir_all(path.join("bin"))?;
            if self.fail_create_after_mkdir {
                return Err(PitchError::EnvironmentBuild {
                    path: path.to_path_buf(),
                    message: "ensurepip failed".into(),
                });
            }
            fs::write(path.join("pyvenv.cfg"), "version = 3.11\n")?;
            Ok(())
        }

        fn install(&self, path: &Path, dependencies: &[String]) -> Result<()> {
            if self.fail_install {
                return Err(PitchError::EnvironmentBuild {
                    path: path.to_path_buf(),
                    message: "pip exited with 1".into(),
                });
            }
            self.installs.borrow_mut().push(dependencies.to_vec());
            Ok(())
        }
    }

    fn manifest(deps: &[&str]) -> PackageManifest {
        PackageManifest::new(
            Vec::new(),
            deps.iter().map(|d| d.to_string()).collect(),
        )
    }

    #[test]
    fn ensure_creates_then_installs_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("venv");
        let backend = FakeBackend::default();

        let outcome = EnvironmentBuilder::new(&backend)
            .ensure(&path, &manifest(&["flask", "pyserial"]))
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.installed, 2);
        assert_eq!(
            *backend.installs.borrow(),
            vec![vec!["flask".to_string(), "pyserial".to_string()]]
        );
    }

    #[test]
    fn ensure_twice_reuses_and_reinstalls_same_set() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("venv");
        let backend = FakeBackend::default();
        let builder = EnvironmentBuilder::new(&backend);
        let m = manifest(&["flask"]);

        let first = builder.ensure(&path, &m).unwrap();
        let second = builder.ensure(&path, &m).unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(*backend.creates.borrow(), 1);
        let installs = backend.installs.borrow();
        assert_eq!(installs.len(), 2);
        assert_eq!(installs[0], installs[1]);
    }

    #[test]
    fn complete_environment_skips_creation() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pyvenv.cfg"), "version = 3.11\n").unwrap();
        let backend = FakeBackend::default();

        let outcome = EnvironmentBuilder::new(&backend)
            .ensure(temp.path(), &manifest(&["flask"]))
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(*backend.creates.borrow(), 0);
    }

    #[test]
    fn leftover_directory_from_interrupted_run_is_recreated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("venv");
        fs::create_dir_all(path.join("bin")).unwrap();
        let backend = FakeBackend::default();

        let outcome = EnvironmentBuilder::new(&backend)
            .ensure(&path, &manifest(&["flask"]))
            .unwrap();

        assert!(outcome.created);
        assert_eq!(*backend.creates.borrow(), 1);
        assert!(path.join("pyvenv.cfg").is_file());
    }

    #[test]
    fn failed_creation_removes_partial_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("venv");
        let backend = FakeBackend {
            fail_create_after_mkdir: true,
            ..Default::default()
        };

        let result = EnvironmentBuilder::new(&backend).ensure(&path, &manifest(&["flask"]));

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(backend.installs.borrow().is_empty());

        // The next run starts from scratch.
        let retry = FakeBackend::default();
        let outcome = EnvironmentBuilder::new(&retry)
            .ensure(&path, &manifest(&["flask"]))
            .unwrap();
        assert!(outcome.created);
    }

    #[test]
    fn install_failure_fails_ensure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("venv");
        let backend = FakeBackend {
            fail_install: true,
            ..Default::default()
        };

        let result = EnvironmentBuilder::new(&backend).ensure(&path, &manifest(&["flask"]));

        assert!(matches!(result, Err(PitchError::EnvironmentBuild { .. })));
        // The environment itself was fully created and stays.
        assert!(path.exists());
    }

    #[test]
    fn empty_manifest_creates_without_install() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("venv");
        let backend = FakeBackend::default();

        let outcome = EnvironmentBuilder::new(&backend)
            .ensure(&path, &manifest(&[]))
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.installed, 0);
        assert!(backend.installs.borrow().is_empty());
    }
}
