use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use launchpy_domain::OS_CLASS_VAR;

use crate::pyenv::DEFAULT_PYENV_PROGRAM;

pub(crate) const VERSION_SUFFIX_VAR: &str = "PYV";
pub(crate) const VERSION_TARGET_VAR: &str = "PYENV_LOCAL";
pub(crate) const ROOT_VAR: &str = "LAUNCHPY_ROOT";
pub(crate) const PYENV_PROGRAM_VAR: &str = "LAUNCHPY_PYENV";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
    cwd: Option<PathBuf>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
            cwd: env::current_dir().ok(),
        }
    }

    /// Reads a variable, treating an empty value the same as unset.
    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub(crate) fn cwd(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn testing(cwd: &std::path::Path, pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            vars,
            cwd: Some(cwd.to_path_buf()),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub(crate) platform: PlatformConfig,
    pub(crate) version_manager: VersionManagerConfig,
    pub(crate) root: Option<PathBuf>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) path: Option<String>,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            platform: PlatformConfig {
                os_class: snapshot.var(OS_CLASS_VAR).map(ToOwned::to_owned),
                version_suffix: snapshot.var(VERSION_SUFFIX_VAR).map(ToOwned::to_owned),
                version_target: snapshot.var(VERSION_TARGET_VAR).map(ToOwned::to_owned),
            },
            version_manager: VersionManagerConfig {
                program: snapshot
                    .var(PYENV_PROGRAM_VAR)
                    .unwrap_or(DEFAULT_PYENV_PROGRAM)
                    .to_string(),
            },
            root: snapshot.var(ROOT_VAR).map(PathBuf::from),
            cwd: snapshot.cwd().cloned(),
            path: snapshot.var("PATH").map(ToOwned::to_owned),
        }
    }

    #[must_use]
    pub fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    #[must_use]
    pub fn version_manager(&self) -> &VersionManagerConfig {
        &self.version_manager
    }

    #[must_use]
    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }
}

/// Raw platform inputs as found in the environment.
#[derive(Debug, Clone, Default)]
pub struct PlatformConfig {
    pub os_class: Option<String>,
    pub version_suffix: Option<String>,
    pub version_target: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VersionManagerConfig {
    pub program: String,
}
