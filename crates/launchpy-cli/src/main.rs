use std::sync::Arc;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use launchpy_core::{
    CommandContext, CommandGroup, CommandInfo, ExecutionOutcome, GlobalOptions, LaunchRequest,
    SystemEffects,
};
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod style;

use cli::{CommandGroupCli, LaunchpyCli, PlanArgs};
use output::OutputOptions;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = LaunchpyCli::parse();
    init_tracing(cli.trace, cli.quiet, cli.verbose);

    let global = GlobalOptions {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
        json: cli.json,
    };
    let ctx = CommandContext::new(&global, Arc::new(SystemEffects::new()));
    let (info, outcome) = dispatch_command(&ctx, &cli.command)?;

    let opts = OutputOptions {
        quiet: cli.quiet,
        json: cli.json,
        no_color: cli.no_color,
    };
    let code = output::emit_output(&opts, info, &outcome)?;
    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn init_tracing(trace: bool, quiet: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let default_filter = format!("launchpy_core={level},launchpy_cli={level}");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn dispatch_command(
    ctx: &CommandContext,
    group: &CommandGroupCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match group {
        CommandGroupCli::Run(args) => {
            let info = CommandInfo::new(CommandGroup::Run, "run");
            let mut request = launch_request_from_args(&args.plan);
            request.extra_args.clone_from(&args.args);
            let outcome =
                launchpy_core::launch_tests(ctx, &request).map_err(|err| eyre!("{err:?}"))?;
            Ok((info, outcome))
        }
        CommandGroupCli::Explain(args) => {
            let info = CommandInfo::new(CommandGroup::Explain, "explain");
            let request = launch_request_from_args(args);
            let outcome =
                launchpy_core::explain_launch(ctx, &request).map_err(|err| eyre!("{err:?}"))?;
            Ok((info, outcome))
        }
    }
}

fn launch_request_from_args(args: &PlanArgs) -> LaunchRequest {
    LaunchRequest {
        root: args.root.clone(),
        os_class: args.os_class.clone(),
        python_suffix: args.python_suffix.clone(),
        pyenv_version: args.pyenv_version.clone(),
        extra_args: Vec::new(),
    }
}
