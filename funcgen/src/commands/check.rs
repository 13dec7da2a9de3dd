use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use funcgen_manifest::{DEFAULT_FILENAME, FunctionsToml};

use super::{UnwrapOrExit, parse_key_val};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct CheckCommand {
    /// Path to functions.toml (defaults to ./functions.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,

    /// Processor option as key=value (overrides [options] in functions.toml)
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self, quiet: bool) -> Result<()> {
        let toml = FunctionsToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&toml, &self.args);

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new(quiet)),
            Format::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .wrap_err("Failed to serialize check report")?;
                println!("{}", json);
            }
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
