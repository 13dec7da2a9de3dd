use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use funcgen_manifest::{DEFAULT_FILENAME, FunctionsToml};

use super::{UnwrapOrExit, parse_key_val};
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to functions.toml (defaults to ./functions.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,

    /// Root directory for generated sources
    #[arg(short, long, default_value = "build/generated")]
    pub output: PathBuf,

    /// Processor option as key=value (overrides [options] in functions.toml)
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self, quiet: bool) -> Result<()> {
        let toml = FunctionsToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &toml,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                args: &self.args,
            },
        );
        report.render(&mut TerminalOutput::new(quiet));

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
