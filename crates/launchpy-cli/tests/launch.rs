#![cfg(unix)]

use std::fs;

use serde_json::Value;

mod common;

use common::{stderr_of, stdout_of, Sandbox};

#[test]
fn linux_runs_python_with_fixed_flags() {
    let sandbox = Sandbox::new("launch-linux").with_python();
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "linux")
        .arg("run")
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(
        stdout.contains(&format!("argv0={}", sandbox.bin.join("python").display())),
        "expected the PATH python to run: {stdout}"
    );
    assert!(
        stdout.contains("args=-m nose -v --exe --with-id --nocapture\n"),
        "fixed flags missing: {stdout}"
    );
    assert!(
        stdout.contains(&format!("pythonpath={}\n", sandbox.search_path())),
        "PYTHONPATH should point at src/: {stdout}"
    );
    assert!(
        stdout.contains(&format!("cwd={}\n", sandbox.root.display())),
        "runner should start in the root: {stdout}"
    );
    assert!(
        stdout.contains("✔ launchpy run: test runner passed"),
        "status line missing: {stdout}"
    );
}

#[test]
fn runner_exit_code_becomes_process_exit_code() {
    let sandbox = Sandbox::new("launch-codes").with_python();
    for code in [0, 1, 2, 127] {
        sandbox
            .launchpy()
            .env("TRAVIS_OS_NAME", "linux")
            .env("FAKE_EXIT", code.to_string())
            .arg("run")
            .assert()
            .code(code);
    }
}

#[test]
fn failing_runner_reports_on_stderr() {
    let sandbox = Sandbox::new("launch-fail").with_python();
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "linux")
        .env("FAKE_EXIT", "1")
        .arg("run")
        .assert()
        .code(1);
    let stderr = stderr_of(&assert);
    assert!(
        stderr.contains("✖ launchpy run: test runner exited with code 1"),
        "failure line missing: {stderr}"
    );
}

#[test]
fn mac_goes_through_pyenv() {
    let sandbox = Sandbox::new("launch-mac").with_pyenv("python3.9");
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "mac")
        .env("PYV", "3.9")
        .env("PYENV_LOCAL", "3.9.1")
        .arg("run")
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    let shim = sandbox.pyenv_root.join("shims").join("python3.9");
    assert!(
        stdout.contains(&format!("argv0={}", shim.display())),
        "python3.9 should come from the pyenv shims: {stdout}"
    );
    assert!(stdout.contains(&format!("pythonpath={}\n", sandbox.search_path())));
    let pinned = fs::read_to_string(sandbox.root.join(".python-version")).expect("pyenv local ran");
    assert_eq!(pinned.trim(), "3.9.1");
}

#[test]
fn mac_pyenv_failure_stops_before_runner() {
    let sandbox = Sandbox::new("launch-mac-missing").with_python();
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "mac")
        .env("PYV", "3.9")
        .env("LAUNCHPY_PYENV", "pyenv-not-installed")
        .arg("run")
        .assert()
        .code(127);
    assert!(!stdout_of(&assert).contains("args="));
    let stderr = stderr_of(&assert);
    assert!(
        stderr.contains("version manager `pyenv-not-installed` could not be started"),
        "missing pyenv should be named: {stderr}"
    );
}

#[test]
fn unset_platform_fails_without_running() {
    let sandbox = Sandbox::new("launch-unset").with_python();
    let assert = sandbox.launchpy().arg("run").assert().code(127);
    assert!(!stdout_of(&assert).contains("args="));
    let stderr = stderr_of(&assert);
    assert!(
        stderr.contains("unsupported platform: TRAVIS_OS_NAME is not set"),
        "explicit platform error expected: {stderr}"
    );
    assert!(stderr.contains("Hint:"), "hint expected: {stderr}");
}

#[test]
fn missing_interpreter_exits_127() {
    let sandbox = Sandbox::new("launch-nopython");
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "linux")
        .env("PATH", sandbox.bin.display().to_string())
        .arg("run")
        .assert()
        .code(127);
    let stderr = stderr_of(&assert);
    assert!(
        stderr.contains("interpreter `python` was not found on PATH"),
        "missing interpreter message expected: {stderr}"
    );
}

#[test]
fn extra_args_are_forwarded() {
    let sandbox = Sandbox::new("launch-extra").with_python();
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "linux")
        .args(["run", "--", "test/test00util.py", "--failed"])
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(
        stdout.contains("args=-m nose -v --exe --with-id --nocapture test/test00util.py --failed\n"),
        "extra args should follow fixed flags: {stdout}"
    );
}

#[test]
fn root_flag_sets_search_path() {
    let sandbox = Sandbox::new("launch-root").with_python();
    let nested = sandbox.root.join("nested");
    fs::create_dir_all(&nested).expect("create nested root");
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "linux")
        .args(["run", "--root", "nested"])
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(
        stdout.contains(&format!("pythonpath={}/src\n", nested.display())),
        "search path should follow --root: {stdout}"
    );
}

#[test]
fn run_json_envelope_carries_runner_code() {
    let sandbox = Sandbox::new("launch-json").with_python();
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "linux")
        .env("FAKE_EXIT", "2")
        .args(["--json", "run"])
        .assert()
        .code(2);
    let stdout = stdout_of(&assert);
    let start = stdout.find('{').expect("json envelope in stdout");
    let payload: Value = serde_json::from_str(&stdout[start..]).expect("valid json");
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["details"]["code"], 2);
    assert_eq!(payload["details"]["interpreter"], "python");
    assert_eq!(payload["details"]["search_path"], sandbox.search_path());
}

#[test]
fn explain_prints_plan_without_side_effects() {
    let sandbox = Sandbox::new("launch-explain").with_pyenv("python3.9");
    let assert = sandbox
        .launchpy()
        .env("TRAVIS_OS_NAME", "mac")
        .env("PYV", "3.9")
        .env("PYENV_LOCAL", "3.9.1")
        .args(["explain", "--json"])
        .assert()
        .success();
    let payload: Value = serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["details"]["platform"], "mac");
    assert_eq!(payload["details"]["interpreter"], "python3.9");
    assert_eq!(
        payload["details"]["version_manager"]["local_version"],
        "3.9.1"
    );
    assert!(
        !sandbox.root.join(".python-version").exists(),
        "explain must not call pyenv local"
    );
}

#[test]
fn explain_human_output_lists_command() {
    let sandbox = Sandbox::new("launch-explain-human");
    let assert = sandbox
        .launchpy()
        .args(["explain", "--os-class", "linux"])
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("platform: linux"), "{stdout}");
    assert!(
        stdout.contains(&format!("env: PYTHONPATH={}", sandbox.search_path())),
        "{stdout}"
    );
    assert!(
        stdout.contains("command: python -m nose -v --exe --with-id --nocapture"),
        "{stdout}"
    );
}

#[test]
fn repeated_runs_are_identical() {
    let sandbox = Sandbox::new("launch-repeat").with_python();
    let run = || {
        let assert = sandbox
            .launchpy()
            .env("TRAVIS_OS_NAME", "linux")
            .arg("run")
            .assert()
            .success();
        stdout_of(&assert)
    };
    assert_eq!(run(), run());
}
