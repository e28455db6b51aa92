use atty::Stream;
use color_eyre::Result;
use launchpy_core::{CommandGroup, CommandInfo, CommandStatus, ExecutionOutcome};

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub quiet: bool,
    pub json: bool,
    pub no_color: bool,
}

pub fn emit_output(opts: &OutputOptions, info: CommandInfo, outcome: &ExecutionOutcome) -> Result<i32> {
    let code = exit_code(outcome);

    if opts.json {
        let payload = launchpy_core::to_json_response(info, outcome, code);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }

    if matches!(outcome.status, CommandStatus::Ok) {
        if opts.quiet {
            return Ok(code);
        }
        if info.group == CommandGroup::Explain {
            println!("{}", outcome.message);
        } else {
            let style = Style::new(opts.no_color, atty::is(Stream::Stdout));
            let message = launchpy_core::format_status_message(info, &outcome.message);
            println!("{}", style.status(&outcome.status, &message));
        }
        return Ok(code);
    }

    let style = Style::new(opts.no_color, atty::is(Stream::Stderr));
    let message = launchpy_core::format_status_message(info, &outcome.message);
    eprintln!("{}", style.status(&outcome.status, &message));
    if let Some(hint) = outcome.hint() {
        eprintln!("{}", style.hint(hint));
    }
    Ok(code)
}

/// The recorded launch code wins; otherwise the status decides.
fn exit_code(outcome: &ExecutionOutcome) -> i32 {
    let fallback = match outcome.status {
        CommandStatus::Ok => 0,
        CommandStatus::UserError => 1,
        CommandStatus::Failure => 2,
    };
    outcome.exit_code().unwrap_or(fallback)
}
