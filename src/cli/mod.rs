//! Command-line interface layer.

mod args;
mod exit_status;
mod report;
mod run;

pub mod commands;

pub use args::{Arguments, Command, ExtractCommand};
pub use exit_status::ExitStatus;
pub use run::run_cli;
