mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

use crate::logging;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for funcgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Parse a `key=value` processor option.
pub(crate) fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid option '{}': expected key=value", s))?;
    if key.is_empty() {
        return Err(format!("invalid option '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Parser)]
#[command(name = "funcgen")]
#[command(version)]
#[command(about = "Generate Kotlin functions from @Function interfaces")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors and warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        logging::init(self.verbose, self.quiet);

        match &self.command {
            Commands::Generate(cmd) => cmd.run(self.quiet),
            Commands::Check(cmd) => cmd.run(self.quiet),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate functions from functions.toml
    Generate(GenerateCommand),

    /// Validate functions.toml and report generator diagnostics
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
