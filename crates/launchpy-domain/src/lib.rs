#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod interpreter;
pub mod plan;
pub mod platform;

pub use interpreter::{select_interpreter, InterpreterSelector, DEFAULT_INTERPRETER};
pub use plan::{
    plan_launch, search_path_for, LaunchInputs, LaunchPlan, VersionDirective, SEARCH_PATH_VAR,
    SEARCH_SUBDIR, TEST_RUNNER_ARGS,
};
pub use platform::{Platform, UnsupportedPlatform, OS_CLASS_VAR};
