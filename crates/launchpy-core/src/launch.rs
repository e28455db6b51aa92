use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use launchpy_domain::{plan_launch, LaunchInputs, LaunchPlan, SEARCH_PATH_VAR};

use crate::context::CommandContext;
use crate::error::LaunchError;
use crate::outcome::ExecutionOutcome;
use crate::pyenv::Pyenv;

/// Per-invocation overrides; anything left `None` comes from the environment.
#[derive(Clone, Debug, Default)]
pub struct LaunchRequest {
    pub root: Option<PathBuf>,
    pub os_class: Option<String>,
    pub python_suffix: Option<String>,
    pub pyenv_version: Option<String>,
    pub extra_args: Vec<String>,
}

/// Sets up the interpreter and runs the test runner, recording its exit code.
///
/// # Errors
///
/// Launch failures are reported as outcomes; an `Err` is reserved for
/// failures outside the launch itself.
pub fn launch_tests(ctx: &CommandContext, request: &LaunchRequest) -> Result<ExecutionOutcome> {
    let plan = match prepare_plan(ctx, request) {
        Ok(plan) => plan,
        Err(err) => return Ok(launch_error_outcome(&err, None)),
    };
    info!(
        platform = %plan.platform,
        interpreter = %plan.interpreter,
        search_path = %plan.search_path.display(),
        "launching test runner"
    );
    match execute_plan(ctx, &plan) {
        Ok(code) => Ok(runner_outcome(&plan, code)),
        Err(err) => Ok(launch_error_outcome(&err, Some(&plan))),
    }
}

/// Describes the launch without running the version manager or the runner.
///
/// # Errors
///
/// Planning failures are reported as outcomes.
pub fn explain_launch(ctx: &CommandContext, request: &LaunchRequest) -> Result<ExecutionOutcome> {
    match prepare_plan(ctx, request) {
        Ok(plan) => Ok(ExecutionOutcome::success(
            render_plan(ctx, &plan),
            plan_details(&plan),
        )),
        Err(err) => Ok(launch_error_outcome(&err, None)),
    }
}

fn prepare_plan(ctx: &CommandContext, request: &LaunchRequest) -> Result<LaunchPlan, LaunchError> {
    let platform = ctx.config().platform();
    let inputs = LaunchInputs {
        os_class: request
            .os_class
            .clone()
            .or_else(|| platform.os_class.clone()),
        version_suffix: request
            .python_suffix
            .clone()
            .or_else(|| platform.version_suffix.clone()),
        version_target: request
            .pyenv_version
            .clone()
            .or_else(|| platform.version_target.clone()),
        root: resolve_root(ctx, request.root.as_deref())?,
        extra_args: request.extra_args.clone(),
    };
    let plan = plan_launch(&inputs)?;
    if plan.version_manager.is_some() && inputs.version_suffix.is_none() {
        warn!(
            interpreter = %plan.interpreter,
            "PYV is not set; using the unversioned interpreter name"
        );
    }
    Ok(plan)
}

fn resolve_root(ctx: &CommandContext, requested: Option<&Path>) -> Result<PathBuf, LaunchError> {
    let cwd = ctx.config().cwd.clone();
    let candidate = requested
        .map(Path::to_path_buf)
        .or_else(|| ctx.config().root().cloned())
        .or_else(|| cwd.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let absolute = match (&cwd, candidate.is_absolute()) {
        (Some(cwd), false) => cwd.join(&candidate),
        _ => candidate,
    };
    let root = absolute
        .canonicalize()
        .map_err(|source| LaunchError::InvalidRoot {
            path: absolute.clone(),
            source,
        })?;
    if !root.is_dir() {
        return Err(LaunchError::InvalidRoot {
            path: root,
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(root)
}

fn execute_plan(ctx: &CommandContext, plan: &LaunchPlan) -> Result<i32, LaunchError> {
    let mut child_env = plan.child_env();
    let mut search = ctx.config().path.clone();

    if let Some(directive) = &plan.version_manager {
        let pyenv = Pyenv::new(&ctx.config().version_manager().program, ctx.process());
        let shell = pyenv.init(&plan.root)?;
        search = Some(prepend_path(&shell.shims, search.as_deref()));
        match directive.local_version.as_deref() {
            Some(version) => pyenv.set_local(version, &plan.root)?,
            None => warn!("PYENV_LOCAL is not set; leaving the pyenv local version untouched"),
        }
        if let Some(path) = &search {
            child_env.push(("PATH".to_string(), path.clone()));
        }
    }

    let interpreter = plan.interpreter.as_str();
    let program = ctx
        .effects()
        .locate_program(interpreter, search.as_deref(), &plan.root)
        .ok_or_else(|| LaunchError::InterpreterNotFound {
            interpreter: interpreter.to_string(),
        })?;
    let program = program.display().to_string();
    debug!(program = %program, args = ?plan.args, env = ?child_env, "spawning test runner");

    let output = ctx
        .process()
        .run_command_passthrough(&program, &plan.args, &child_env, &plan.root)
        .map_err(|err| spawn_error(interpreter, &err))?;
    debug!(code = output.code, "test runner exited");
    Ok(output.code)
}

fn prepend_path(entry: &Path, existing: Option<&str>) -> String {
    let mut parts = vec![entry.to_path_buf()];
    if let Some(existing) = existing {
        parts.extend(env::split_paths(existing).filter(|part| part != entry));
    }
    env::join_paths(&parts)
        .ok()
        .and_then(|joined| joined.into_string().ok())
        .unwrap_or_else(|| entry.display().to_string())
}

fn spawn_error(program: &str, err: &anyhow::Error) -> LaunchError {
    let kind = err
        .root_cause()
        .downcast_ref::<std::io::Error>()
        .map_or(std::io::ErrorKind::Other, std::io::Error::kind);
    LaunchError::Spawn {
        program: program.to_string(),
        kind,
        message: err.root_cause().to_string(),
    }
}

fn runner_outcome(plan: &LaunchPlan, code: i32) -> ExecutionOutcome {
    let mut details = plan_details(plan);
    details["code"] = json!(code);
    if code == 0 {
        ExecutionOutcome::success("test runner passed", details)
    } else {
        ExecutionOutcome::failure(format!("test runner exited with code {code}"), details)
    }
}

fn launch_error_outcome(err: &LaunchError, plan: Option<&LaunchPlan>) -> ExecutionOutcome {
    let mut details = plan.map_or_else(|| json!({}), plan_details);
    details["code"] = json!(err.exit_code());
    details["reason"] = json!(err.reason());
    if let Some(hint) = err.hint() {
        details["hint"] = json!(hint);
    }
    let message = err.to_string();
    if err.is_user_error() {
        ExecutionOutcome::user_error(message, details)
    } else {
        ExecutionOutcome::failure(message, details)
    }
}

fn plan_details(plan: &LaunchPlan) -> Value {
    json!({
        "platform": plan.platform,
        "interpreter": plan.interpreter,
        "version_manager": plan.version_manager,
        "root": plan.root.display().to_string(),
        "search_path": plan.search_path.display().to_string(),
        "args": plan.args,
    })
}

fn render_plan(ctx: &CommandContext, plan: &LaunchPlan) -> String {
    let mut lines = vec![
        format!("platform: {}", plan.platform),
        format!("root: {}", plan.root.display()),
    ];
    if let Some(directive) = &plan.version_manager {
        let program = &ctx.config().version_manager().program;
        lines.push(format!("version manager: {program} init -"));
        if let Some(version) = &directive.local_version {
            lines.push(format!("version manager: {program} local {version}"));
        }
    }
    lines.push(format!(
        "env: {SEARCH_PATH_VAR}={}",
        plan.search_path.display()
    ));
    lines.push(format!("command: {}", plan.argv().join(" ")));
    lines.join("\n")
}
