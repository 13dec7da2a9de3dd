//! Generate operation - one pass from functions.toml to Kotlin source.

use std::{
    io,
    path::{Path, PathBuf},
};

use funcgen_codegen::{Diagnostic, FileSystemCodeGenerator, MemoryCodeGenerator};
use funcgen_manifest::FunctionsToml;

use super::{output_spec, run_pass};
use crate::reports::{GenerateReport, GenerationResult, PreviewFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Root directory for generated sources.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// `--arg key=value` processor options.
    pub args: &'a [(String, String)],
}

/// Execute the generate operation.
///
/// A failed pass leaves no generated file behind. A pass that finds no
/// annotated declarations removes the file left by an earlier run.
pub fn generate(toml: &FunctionsToml, opts: GenerateOptions) -> GenerateReport {
    let (pass, result) = if opts.dry_run {
        let mut codegen = MemoryCodeGenerator::new();
        let pass = run_pass(toml, opts.args, &mut codegen);
        let files = codegen
            .files()
            .iter()
            .map(|(path, content)| PreviewFile {
                path: path.display().to_string(),
                content: content.clone(),
            })
            .collect();
        (pass, GenerationResult::Preview { files })
    } else {
        let mut codegen = FileSystemCodeGenerator::new(opts.output_dir);
        let mut pass = run_pass(toml, opts.args, &mut codegen);

        let mut files = codegen.generated().to_vec();
        let stale = if pass.fatal.is_some() {
            std::mem::take(&mut files)
        } else if pass.outcome.file.is_none() {
            vec![opts.output_dir.join(output_spec(toml).relative_path())]
        } else {
            Vec::new()
        };
        let removed = remove_files(stale, &mut pass.diagnostics);

        let result = GenerationResult::Written {
            output_dir: opts.output_dir.to_path_buf(),
            files,
            removed,
        };
        (pass, result)
    };

    GenerateReport {
        config_path: toml.path().to_path_buf(),
        diagnostics: pass.diagnostics,
        outcome: pass.outcome,
        fatal: pass.fatal,
        result,
    }
}

/// Delete files, returning the ones that existed.
///
/// Failures are reported as warnings.
fn remove_files(paths: Vec<PathBuf>, diagnostics: &mut Vec<Diagnostic>) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for path in paths {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed generated file");
                removed.push(path);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => diagnostics.push(Diagnostic::warning(format!(
                "failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }
    removed
}
