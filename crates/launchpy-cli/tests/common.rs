#![cfg(unix)]
#![allow(dead_code)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

const FAKE_PYTHON: &str = r#"#!/bin/sh
printf 'argv0=%s\n' "$0"
printf 'args=%s\n' "$*"
printf 'pythonpath=%s\n' "$PYTHONPATH"
printf 'cwd=%s\n' "$(pwd -P)"
exit "${FAKE_EXIT:-0}"
"#;

const FAKE_PYENV: &str = r#"#!/bin/sh
case "$1" in
  init) printf 'export PATH="%s/shims:${PATH}"\n' "$FAKE_PYENV_ROOT" ;;
  root) printf '%s\n' "$FAKE_PYENV_ROOT" ;;
  local) printf '%s\n' "$2" > .python-version ;;
  *) echo "pyenv: no such command '$1'" >&2; exit 1 ;;
esac
"#;

/// A scratch project with fake `python`/`pyenv` executables.
pub struct Sandbox {
    _temp: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
    pub pyenv_root: PathBuf,
}

impl Sandbox {
    pub fn new(prefix: &str) -> Self {
        let temp = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .expect("tempdir");
        let base = temp.path().canonicalize().expect("canonical tempdir");
        let root = base.join("project");
        let bin = base.join("bin");
        let pyenv_root = base.join("pyenv");
        fs::create_dir_all(root.join("src")).expect("create project");
        fs::create_dir_all(&bin).expect("create bin");
        fs::create_dir_all(pyenv_root.join("shims")).expect("create shims");
        Self {
            _temp: temp,
            root,
            bin,
            pyenv_root,
        }
    }

    pub fn with_python(self) -> Self {
        write_executable(&self.bin.join("python"), FAKE_PYTHON);
        self
    }

    pub fn with_pyenv(self, versioned: &str) -> Self {
        write_executable(&self.bin.join("pyenv"), FAKE_PYENV);
        write_executable(&self.pyenv_root.join("shims").join(versioned), FAKE_PYTHON);
        self
    }

    pub fn search_path(&self) -> String {
        self.root.join("src").display().to_string()
    }

    /// `launchpy` with a scrubbed environment and only the sandbox tools on PATH.
    pub fn launchpy(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("launchpy");
        cmd.env_clear()
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin.display()))
            .env("FAKE_PYENV_ROOT", &self.pyenv_root)
            .env("NO_COLOR", "1")
            .current_dir(&self.root);
        cmd
    }
}

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write script");
    let mut perms = fs::metadata(path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod script");
}

pub fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout")
}

pub fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr")
}
