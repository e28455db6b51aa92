use std::io;
use std::path::PathBuf;

use launchpy_domain::{UnsupportedPlatform, DEFAULT_INTERPRETER};

/// Exit code shells use for "command not found".
pub(crate) const COMMAND_NOT_FOUND: i32 = 127;
const COMMAND_NOT_EXECUTABLE: i32 = 126;

#[derive(Debug, thiserror::Error)]
pub enum VersionManagerError {
    #[error("version manager `{program}` could not be started: {message}")]
    Missing { program: String, message: String },
    #[error("`{program} {step}` failed with exit code {code}{}", stderr_suffix(.stderr))]
    Failed {
        program: String,
        step: &'static str,
        code: i32,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatform),
    #[error("interpreter `{interpreter}` was not found on PATH")]
    InterpreterNotFound { interpreter: String },
    #[error(transparent)]
    VersionManager(#[from] VersionManagerError),
    #[error("failed to start `{program}`: {message}")]
    Spawn {
        program: String,
        kind: io::ErrorKind,
        message: String,
    },
    #[error("root directory {} is not usable: {source}", .path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedPlatform(_) | Self::InterpreterNotFound { .. } => COMMAND_NOT_FOUND,
            Self::VersionManager(VersionManagerError::Missing { .. }) => COMMAND_NOT_FOUND,
            Self::VersionManager(VersionManagerError::Failed { code, .. }) => {
                if *code == 0 {
                    1
                } else {
                    *code
                }
            }
            Self::Spawn { kind, .. } => match kind {
                io::ErrorKind::NotFound => COMMAND_NOT_FOUND,
                io::ErrorKind::PermissionDenied => COMMAND_NOT_EXECUTABLE,
                _ => 1,
            },
            Self::InvalidRoot { .. } => 2,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform(_) => "unsupported_platform",
            Self::InterpreterNotFound { .. } => "interpreter_not_found",
            Self::VersionManager(_) => "version_manager_failed",
            Self::Spawn { .. } => "spawn_failed",
            Self::InvalidRoot { .. } => "invalid_root",
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnsupportedPlatform(_) => {
                Some("Set TRAVIS_OS_NAME to `linux` or `mac` (or pass --os-class).".to_string())
            }
            Self::InterpreterNotFound { interpreter } if interpreter != DEFAULT_INTERPRETER => {
                Some(format!(
                    "Install {interpreter} or check PYV; on mac it should come from the pyenv shims."
                ))
            }
            Self::InterpreterNotFound { .. } => {
                Some("Install a `python` executable on PATH.".to_string())
            }
            Self::VersionManager(VersionManagerError::Missing { .. }) => {
                Some("Install pyenv or point LAUNCHPY_PYENV at it.".to_string())
            }
            Self::VersionManager(VersionManagerError::Failed { step: "local", .. }) => Some(
                "Check that PYENV_LOCAL names a version installed in pyenv (`pyenv versions`)."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// User-correctable setup problems, as opposed to a broken system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform(_) | Self::InterpreterNotFound { .. } | Self::InvalidRoot { .. }
        )
    }
}
