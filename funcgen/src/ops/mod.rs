//! Core operations.
//!
//! This module contains the business logic for funcgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

pub use check::check;
use funcgen_codegen::{
    CodeGenerator, Diagnostic, DiagnosticLog, FileSpec, FunctionProcessor, Options,
    ProcessOutcome,
};
use funcgen_manifest::FunctionsToml;
pub use generate::{GenerateOptions, generate};
use indexmap::IndexMap;

/// Result of one pass, successful or not.
struct Pass {
    outcome: ProcessOutcome,
    diagnostics: Vec<Diagnostic>,
    fatal: Option<String>,
}

/// Options from the `[options]` table, overridden by `--arg` pairs.
fn option_args(toml: &FunctionsToml, args: &[(String, String)]) -> IndexMap<String, String> {
    let mut merged = toml.options();
    for (key, value) in args {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Location of the generated file, relative to the output root.
fn output_spec(toml: &FunctionsToml) -> FileSpec {
    FileSpec::new(toml.output_package(), toml.output_file())
}

/// Run one generation pass over the file into the given sink.
fn run_pass(
    toml: &FunctionsToml,
    args: &[(String, String)],
    codegen: &mut dyn CodeGenerator,
) -> Pass {
    let mut log = DiagnosticLog::new();
    let options = Options::from_args(&option_args(toml, args), &mut log);
    tracing::debug!(?options, path = %toml.path().display(), "running generation pass");

    let mut processor = FunctionProcessor::with_logger(options, log).output(output_spec(toml));
    let result = processor.process(toml, codegen);
    let diagnostics = processor.into_logger().into_diagnostics();

    match result {
        Ok(outcome) => Pass {
            outcome,
            diagnostics,
            fatal: None,
        },
        Err(err) => Pass {
            outcome: ProcessOutcome::default(),
            diagnostics,
            fatal: Some(error_chain(&err)),
        },
    }
}

/// Render an error with its sources, `outer: inner`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
