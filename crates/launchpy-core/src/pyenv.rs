use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::effects::ProcessRunner;
use crate::error::VersionManagerError;
use crate::process::RunOutput;

pub const DEFAULT_PYENV_PROGRAM: &str = "pyenv";

/// What `pyenv init` contributes to the child's environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PyenvShell {
    pub root: PathBuf,
    pub shims: PathBuf,
}

/// Thin driver for the pyenv commands the launcher needs.
pub struct Pyenv<'a> {
    program: &'a str,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Pyenv<'a> {
    pub fn new(program: &'a str, runner: &'a dyn ProcessRunner) -> Self {
        Self { program, runner }
    }

    /// Runs the shell-integration hook and locates the shims directory.
    ///
    /// The hook's shell script cannot be evaluated here; its only effect the
    /// child needs is the shims directory on `PATH`, which the caller adds.
    pub fn init(&self, cwd: &Path) -> Result<PyenvShell, VersionManagerError> {
        let hook = self.run("init", &["init", "-"], cwd)?;
        trace!(script = %hook.stdout.trim(), "pyenv init hook");
        let output = self.run("root", &["root"], cwd)?;
        let root = PathBuf::from(output.stdout.trim());
        let shims = root.join("shims");
        debug!(root = %root.display(), shims = %shims.display(), "pyenv initialized");
        Ok(PyenvShell { root, shims })
    }

    /// Pins `version` for `cwd` (writes `.python-version` there).
    pub fn set_local(&self, version: &str, cwd: &Path) -> Result<(), VersionManagerError> {
        self.run("local", &["local", version], cwd)?;
        debug!(version, cwd = %cwd.display(), "pyenv local version set");
        Ok(())
    }

    fn run(
        &self,
        step: &'static str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<RunOutput, VersionManagerError> {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
        let output = self
            .runner
            .run_command(self.program, &args, &[], cwd)
            .map_err(|err| VersionManagerError::Missing {
                program: self.program.to_string(),
                message: format!("{err:#}"),
            })?;
        if output.code != 0 {
            return Err(VersionManagerError::Failed {
                program: self.program.to_string(),
                step,
                code: output.code,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }
}
