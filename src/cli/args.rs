//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Rewrite Chinese text into translation calls and collect the
//!   key catalog
//! - `init`: Initialize the hanex configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Take the parsed command, printing help when none was given.
    pub fn command_or_help(self) -> Option<Command> {
        match self.command {
            Some(command) => Some(command),
            None => {
                Self::command().print_help().ok();
                None
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract Chinese text into translation calls and a locale catalog
    Extract(ExtractCommand),
    /// Initialize a new .hanexrc.json configuration file
    Init,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Files to process directly, bypassing the configured include scan
    pub paths: Vec<PathBuf>,

    /// Write rewritten files and the catalog (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Catalog file path (overrides config file)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Local name the injected import binds (overrides config file)
    #[arg(long)]
    pub import_name: Option<String>,

    /// Module path of the injected import (overrides config file)
    #[arg(long)]
    pub import_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_with_overrides() {
        let args = Arguments::parse_from([
            "hanex",
            "extract",
            "src/App.vue",
            "--apply",
            "--catalog",
            "./locales/zh.json",
            "--import-name",
            "intl",
            "--import-path",
            "@/i18n",
            "-v",
        ]);

        let Some(Command::Extract(cmd)) = args.command else {
            panic!("expected extract command");
        };
        assert_eq!(cmd.paths, vec![PathBuf::from("src/App.vue")]);
        assert!(cmd.apply);
        assert_eq!(cmd.catalog.as_deref(), Some("./locales/zh.json"));
        assert_eq!(cmd.import_name.as_deref(), Some("intl"));
        assert_eq!(cmd.import_path.as_deref(), Some("@/i18n"));
        assert!(cmd.verbose);
    }

    #[test]
    fn test_extract_defaults_to_dry_run() {
        let args = Arguments::parse_from(["hanex", "extract"]);
        let Some(Command::Extract(cmd)) = args.command else {
            panic!("expected extract command");
        };
        assert!(!cmd.apply);
        assert!(cmd.paths.is_empty());
        assert!(cmd.catalog.is_none());
    }

    #[test]
    fn test_parse_init() {
        let args = Arguments::parse_from(["hanex", "init"]);
        assert!(matches!(args.command, Some(Command::Init)));
    }
}
