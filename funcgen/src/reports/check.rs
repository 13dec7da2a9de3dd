//! Check command report data structures.

use std::path::PathBuf;

use funcgen_codegen::{Diagnostic, ProcessOutcome};
use serde::Serialize;

use super::{
    output::{Output, Report},
    plural, render_diagnostics,
};

/// Report data from validating a functions.toml and running a trial pass.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of declarations in the file.
    pub declarations: usize,
    /// Number of declarations annotated with `@Function`.
    pub annotated: usize,
    pub outcome: ProcessOutcome,
    pub diagnostics: Vec<Diagnostic>,
    /// Error that aborted the trial pass.
    pub fatal: Option<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.fatal.is_none() && !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);
        if let Some(fatal) = &self.fatal {
            out.error(fatal);
        }

        if !self.diagnostics.is_empty() || self.fatal.is_some() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {} declaration{}, {} annotated with @Function",
            self.declarations,
            plural(self.declarations),
            self.annotated
        ));
        if let Some(file) = &self.outcome.file {
            out.preformatted(&format!(
                "  {} function{} would be generated into {}",
                self.outcome.functions,
                plural(self.outcome.functions),
                file.display()
            ));
        }
    }
}
