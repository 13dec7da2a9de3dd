//! Generate command report data structures.

use std::path::PathBuf;

use funcgen_codegen::{Diagnostic, ProcessOutcome};

use super::{
    output::{Output, Report},
    plural, render_diagnostics,
};

/// Report data from one generation pass.
#[derive(Debug)]
pub struct GenerateReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Diagnostics logged during the pass, in order.
    pub diagnostics: Vec<Diagnostic>,
    /// Summary of the pass; default when the pass failed.
    pub outcome: ProcessOutcome,
    /// Error that aborted the pass.
    pub fatal: Option<String>,
    pub result: GenerationResult,
}

/// Where the generated file went.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written below the output directory.
    Written {
        output_dir: PathBuf,
        files: Vec<PathBuf>,
        /// Stale or partial files that were deleted.
        removed: Vec<PathBuf>,
    },
    /// Dry-run preview.
    Preview { files: Vec<PreviewFile> },
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl GenerateReport {
    /// Whether the pass failed or logged errors.
    pub fn has_errors(&self) -> bool {
        self.fatal.is_some() || self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);
        if let Some(fatal) = &self.fatal {
            out.error(fatal);
            if let GenerationResult::Written { removed, .. } = &self.result {
                render_removed(out, removed);
            }
            return;
        }

        match &self.result {
            GenerationResult::Preview { files } => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
            }
            GenerationResult::Written {
                output_dir,
                files,
                removed,
            } => {
                if !files.is_empty() {
                    out.section("Generated");
                    for file in files {
                        out.added_item(&file.display().to_string());
                    }
                    out.newline();
                }
                if !removed.is_empty() {
                    render_removed(out, removed);
                    out.newline();
                }
                out.key_value("Output", &output_dir.display().to_string());
            }
        }

        self.render_summary(out);
    }
}

fn render_removed(out: &mut dyn Output, removed: &[PathBuf]) {
    if removed.is_empty() {
        return;
    }
    out.section("Removed");
    for file in removed {
        out.removed_item(&file.display().to_string());
    }
}

impl GenerateReport {
    fn render_summary(&self, out: &mut dyn Output) {
        let outcome = &self.outcome;
        if outcome.file.is_none() {
            out.preformatted(&format!(
                "No @Function declarations in {}; nothing generated",
                self.config_path.display()
            ));
            return;
        }

        out.preformatted(&format!(
            "{} function{} generated",
            outcome.functions,
            plural(outcome.functions)
        ));
        if !outcome.skipped.is_empty() {
            out.section("Skipped");
            for name in &outcome.skipped {
                out.list_item(name);
            }
        }
        if !outcome.deferred.is_empty() {
            out.section("Deferred (unresolved types)");
            for name in &outcome.deferred {
                out.list_item(name);
            }
        }
    }
}
