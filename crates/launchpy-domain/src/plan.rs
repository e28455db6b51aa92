use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::interpreter::{select_interpreter, InterpreterSelector};
use crate::platform::{Platform, UnsupportedPlatform};

/// Variable the test runner reads to find importable library code.
pub const SEARCH_PATH_VAR: &str = "PYTHONPATH";

/// Library code lives under this directory of the root.
pub const SEARCH_SUBDIR: &str = "src";

/// Arguments passed to the interpreter ahead of any caller-supplied extras.
///
/// `-v` verbose discovery, `--exe` also collects executable modules,
/// `--with-id` tracks test ids, `--nocapture` leaves stdout alone.
pub const TEST_RUNNER_ARGS: [&str; 6] = ["-m", "nose", "-v", "--exe", "--with-id", "--nocapture"];

/// Raw values a launch is planned from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchInputs {
    pub os_class: Option<String>,
    pub version_suffix: Option<String>,
    pub version_target: Option<String>,
    pub root: PathBuf,
    pub extra_args: Vec<String>,
}

/// Version-manager work required before launching on Mac.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionDirective {
    /// Version passed to `pyenv local`; skipped when absent.
    pub local_version: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub platform: Platform,
    pub interpreter: InterpreterSelector,
    pub version_manager: Option<VersionDirective>,
    pub root: PathBuf,
    pub search_path: PathBuf,
    pub args: Vec<String>,
}

impl LaunchPlan {
    /// Environment handed to the child; the launcher's own environment is
    /// never modified.
    pub fn child_env(&self) -> Vec<(String, String)> {
        vec![(
            SEARCH_PATH_VAR.to_string(),
            self.search_path.display().to_string(),
        )]
    }

    /// Full command line, interpreter first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.interpreter.to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

pub fn search_path_for(root: &Path) -> PathBuf {
    root.join(SEARCH_SUBDIR)
}

/// Computes what a launch will do without touching the system.
///
/// The same inputs always produce the same plan.
pub fn plan_launch(inputs: &LaunchInputs) -> Result<LaunchPlan, UnsupportedPlatform> {
    let platform = Platform::from_os_class(inputs.os_class.as_deref())?;
    let interpreter = select_interpreter(platform, inputs.version_suffix.as_deref());
    let version_manager = platform
        .uses_version_manager()
        .then(|| VersionDirective {
            local_version: inputs.version_target.clone(),
        });
    let args = TEST_RUNNER_ARGS
        .iter()
        .map(|arg| (*arg).to_string())
        .chain(inputs.extra_args.iter().cloned())
        .collect();
    Ok(LaunchPlan {
        platform,
        interpreter,
        version_manager,
        root: inputs.root.clone(),
        search_path: search_path_for(&inputs.root),
        args,
    })
}
