use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Interpreter command used on Linux, and the prefix for versioned names on Mac.
pub const DEFAULT_INTERPRETER: &str = "python";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterpreterSelector(String);

impl InterpreterSelector {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InterpreterSelector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterpreterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picks the interpreter command for `platform`.
///
/// Linux always gets [`DEFAULT_INTERPRETER`]. Mac appends the version suffix
/// verbatim (`3.9` gives `python3.9`); a missing suffix leaves the bare prefix.
pub fn select_interpreter(platform: Platform, version_suffix: Option<&str>) -> InterpreterSelector {
    match platform {
        Platform::Linux => InterpreterSelector(DEFAULT_INTERPRETER.to_string()),
        Platform::Mac => {
            let suffix = version_suffix.unwrap_or_default();
            InterpreterSelector(format!("{DEFAULT_INTERPRETER}{suffix}"))
        }
    }
}
