//! One generation pass.
//!
//! [`FunctionProcessor::process`] asks a [`SymbolSource`] for every declaration
//! annotated with `@Function`, generates one function per declaration, and
//! appends them, in discovery order, to a single output file.

use std::path::PathBuf;

use funcgen_symbols::{Declaration, Resolver, SymbolSource, TypeReference};
use serde::Serialize;

use crate::{
    Options, Result,
    diagnostic::{DiagnosticLog, Logger},
    output::{CodeGenerator, Emitter, FileSpec},
    render::TypeRenderer,
    visitor::DeclarationVisitor,
};

/// Short name of the annotation that requests a generated function.
pub const FUNCTION_ANNOTATION: &str = "Function";

/// Required argument of [`FUNCTION_ANNOTATION`] naming the generated function.
pub const NAME_ARGUMENT: &str = "name";

/// Short name of the property annotation designating the return value.
pub const RETURNS_ANNOTATION: &str = "Returns";

/// Summary of a finished pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// Relative path of the generated file, `None` when nothing was annotated.
    pub file: Option<PathBuf>,
    /// Number of functions written.
    pub functions: usize,
    /// Qualified names of declarations that were skipped.
    pub skipped: Vec<String>,
    /// Qualified names of declarations whose types did not all resolve.
    ///
    /// An outer driver may retry these in a later pass.
    pub deferred: Vec<String>,
}

/// Generates functions from `@Function` interfaces.
pub struct FunctionProcessor<L: Logger = DiagnosticLog> {
    options: Options,
    output: FileSpec,
    logger: L,
}

impl FunctionProcessor {
    /// Create a processor that collects diagnostics in a [`DiagnosticLog`].
    pub fn new(options: Options) -> Self {
        Self::with_logger(options, DiagnosticLog::new())
    }
}

impl<L: Logger> FunctionProcessor<L> {
    pub fn with_logger(options: Options, logger: L) -> Self {
        Self {
            options,
            output: FileSpec::default(),
            logger,
        }
    }

    /// Set where the generated file goes.
    pub fn output(mut self, output: FileSpec) -> Self {
        self.output = output;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn into_logger(self) -> L {
        self.logger
    }

    /// Run one generation pass.
    ///
    /// Non-fatal problems (wrong declaration kind, unresolvable types) are
    /// logged and the pass continues. The output file is closed on every exit
    /// path; after a fatal error it may hold a partial result.
    ///
    /// # Errors
    ///
    /// Fails on a missing `@Function` name, on more than one `@Returns`
    /// marker in a declaration, or when the output cannot be written.
    pub fn process(
        &mut self,
        source: &dyn SymbolSource,
        codegen: &mut dyn CodeGenerator,
    ) -> Result<ProcessOutcome> {
        let symbols = source.symbols_with_annotation(FUNCTION_ANNOTATION);
        if symbols.is_empty() {
            tracing::debug!("no declarations annotated with @{}", FUNCTION_ANNOTATION);
            return Ok(ProcessOutcome::default());
        }

        let resolver = source.resolver();
        let mut emitter = Emitter::open(codegen, &self.output)?;
        let emitted = self.emit_all(&symbols, resolver, &mut emitter);
        let closed = emitter.close();

        let (functions, skipped) = emitted?;
        let bytes = closed?;

        // Skipped declarations are never generated, so retrying them is pointless.
        let deferred: Vec<String> = symbols
            .iter()
            .filter(|declaration| !is_resolvable(declaration, resolver))
            .map(|declaration| declaration.qualified_name())
            .filter(|name| !skipped.contains(name))
            .collect();

        tracing::info!(
            functions,
            skipped = skipped.len(),
            deferred = deferred.len(),
            bytes,
            "generation pass finished"
        );

        Ok(ProcessOutcome {
            file: Some(self.output.relative_path()),
            functions,
            skipped,
            deferred,
        })
    }

    fn emit_all(
        &mut self,
        symbols: &[&Declaration],
        resolver: &dyn Resolver,
        emitter: &mut Emitter<'_>,
    ) -> Result<(usize, Vec<String>)> {
        let visitor = DeclarationVisitor::new(TypeRenderer::new(resolver), &self.options);
        let mut functions = 0;
        let mut skipped = Vec::new();

        for declaration in symbols {
            match visitor.visit(declaration, &mut self.logger)? {
                Some(text) => {
                    emitter.emit(&text)?;
                    functions += 1;
                }
                None => skipped.push(declaration.qualified_name()),
            }
        }

        Ok((functions, skipped))
    }
}

/// Whether every type mentioned by the declaration's properties resolves.
fn is_resolvable(declaration: &Declaration, resolver: &dyn Resolver) -> bool {
    let mut pending: Vec<&TypeReference> = declaration
        .properties
        .iter()
        .map(|property| &property.type_reference)
        .collect();

    while let Some(reference) = pending.pop() {
        if resolver.qualified_name(&reference.name).is_none() {
            return false;
        }
        pending.extend(reference.arguments.iter().filter_map(|a| a.reference()));
    }
    true
}
