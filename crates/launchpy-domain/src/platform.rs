use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable naming the CI operating-system class.
pub const OS_CLASS_VAR: &str = "TRAVIS_OS_NAME";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Mac,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported platform: {}", describe_os_class(.os_class.as_deref()))]
pub struct UnsupportedPlatform {
    pub os_class: Option<String>,
}

fn describe_os_class(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{OS_CLASS_VAR}={value:?} (expected \"linux\" or \"mac\")"),
        None => format!("{OS_CLASS_VAR} is not set (expected \"linux\" or \"mac\")"),
    }
}

impl Platform {
    /// Maps the raw OS-class label onto a platform.
    ///
    /// Labels are matched exactly; `Linux`, ` linux` or `osx` are all
    /// rejected.
    pub fn from_os_class(value: Option<&str>) -> Result<Self, UnsupportedPlatform> {
        match value {
            Some("linux") => Ok(Self::Linux),
            Some("mac") => Ok(Self::Mac),
            other => Err(UnsupportedPlatform {
                os_class: other.map(ToOwned::to_owned),
            }),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Mac => "mac",
        }
    }

    /// Whether this platform goes through the version manager before launch.
    pub const fn uses_version_manager(self) -> bool {
        matches!(self, Self::Mac)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
