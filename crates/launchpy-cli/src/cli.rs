use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub const LAUNCHPY_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nGlobal options:\n{options}\n";

pub const LAUNCHPY_BEFORE_HELP: &str = concat!(
    "launchpy ",
    env!("CARGO_PKG_VERSION"),
    " – CI test launcher for Python projects\n\n",
    "\x1b[1;36mCommands\x1b[0m\n",
    "  run              Pick the interpreter for this CI platform and run nose.\n",
    "  explain          Show what `run` would do without running anything.\n\n",
    "\x1b[1;36mEnvironment\x1b[0m\n",
    "  TRAVIS_OS_NAME   `linux` runs `python`; `mac` goes through pyenv.\n",
    "  PYV              Version suffix on mac (`3.9` selects python3.9).\n",
    "  PYENV_LOCAL      Version pinned with `pyenv local` on mac.\n",
    "  LAUNCHPY_ROOT    Project root (defaults to the current directory).\n",
    "  LAUNCHPY_PYENV   pyenv executable (defaults to `pyenv`).\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "launchpy",
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = LAUNCHPY_BEFORE_HELP,
    help_template = LAUNCHPY_HELP_TEMPLATE
)]
pub struct LaunchpyCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)", global = true)]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: CommandGroupCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "Select the interpreter, set PYTHONPATH, and run the test runner.",
        override_usage = "launchpy run [--root DIR] [-- <ARG>...]",
        after_help = "Examples:\n  TRAVIS_OS_NAME=linux launchpy run\n  TRAVIS_OS_NAME=mac PYV=3.9 PYENV_LOCAL=3.9.1 launchpy run -- test/test00util.py"
    )]
    Run(RunArgs),
    #[command(
        about = "Print the launch plan (interpreter, pyenv steps, PYTHONPATH, command).",
        override_usage = "launchpy explain [--root DIR]",
        after_help = "Examples:\n  TRAVIS_OS_NAME=mac PYV=3.9 launchpy explain --json"
    )]
    Explain(PlanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Project root; PYTHONPATH becomes <DIR>/src (overrides LAUNCHPY_ROOT)"
    )]
    pub root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "LABEL",
        help = "Platform label, `linux` or `mac` (overrides TRAVIS_OS_NAME)"
    )]
    pub os_class: Option<String>,
    #[arg(
        long,
        value_name = "SUFFIX",
        help = "Interpreter version suffix used on mac (overrides PYV)"
    )]
    pub python_suffix: Option<String>,
    #[arg(
        long,
        value_name = "VERSION",
        help = "Version for `pyenv local` on mac (overrides PYENV_LOCAL)"
    )]
    pub pyenv_version: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    #[arg(
        value_name = "ARG",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Extra arguments appended after the runner's fixed flags"
    )]
    pub args: Vec<String>,
}
