use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::process::{run_command, run_command_passthrough, RunOutput};

pub trait ProcessRunner: Send + Sync {
    /// Runs a helper command to completion with captured output.
    fn run_command(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput>;

    /// Runs a command with inherited stdio and reports only its exit code.
    fn run_command_passthrough(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput>;
}

pub trait Effects: Send + Sync {
    fn process(&self) -> &dyn ProcessRunner;

    /// Resolves `program` the way the child would, searching `path` when given.
    fn locate_program(&self, program: &str, path: Option<&str>, cwd: &Path) -> Option<PathBuf>;
}

pub type SharedEffects = Arc<dyn Effects>;

pub struct SystemEffects {
    process: Arc<SystemProcess>,
}

impl SystemEffects {
    #[must_use]
    pub fn new() -> Self {
        Self {
            process: Arc::new(SystemProcess),
        }
    }
}

impl Default for SystemEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl Effects for SystemEffects {
    fn process(&self) -> &dyn ProcessRunner {
        self.process.as_ref()
    }

    fn locate_program(&self, program: &str, path: Option<&str>, cwd: &Path) -> Option<PathBuf> {
        match path {
            Some(path) => which::which_in(program, Some(path), cwd).ok(),
            None => which::which(program).ok(),
        }
    }
}

struct SystemProcess;

impl ProcessRunner for SystemProcess {
    fn run_command(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput> {
        run_command(program, args, envs, cwd)
    }

    fn run_command_passthrough(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput> {
        run_command_passthrough(program, args, envs, cwd)
    }
}
