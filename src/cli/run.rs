use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::{extract::extract, init::init};
use super::exit_status::ExitStatus;

/// Dispatch the parsed command line.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(command) = args.command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Command::Extract(cmd) => extract(cmd),
        Command::Init => init(),
    }
}
