#![deny(clippy::all, warnings)]

mod config;
mod context;
mod effects;
mod error;
mod launch;
mod outcome;
mod process;
mod pyenv;

pub use crate::config::{Config, GlobalOptions, PlatformConfig, VersionManagerConfig};
pub use crate::context::CommandContext;
pub use crate::effects::{Effects, ProcessRunner, SharedEffects, SystemEffects};
pub use crate::error::{LaunchError, VersionManagerError};
pub use crate::launch::{explain_launch, launch_tests, LaunchRequest};
pub use crate::outcome::{
    format_status_message, to_json_response, CommandGroup, CommandInfo, CommandStatus,
    ExecutionOutcome,
};
pub use crate::process::RunOutput;
pub use crate::pyenv::{Pyenv, PyenvShell, DEFAULT_PYENV_PROGRAM};

pub use launchpy_domain::{LaunchPlan, Platform};

pub const LAUNCHPY_VERSION: &str = env!("CARGO_PKG_VERSION");
