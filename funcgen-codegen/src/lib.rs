//! Function generator core.
//!
//! Turns interfaces annotated with `@Function` into function definitions whose
//! parameters mirror the interface's properties.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented text assembly ([`CodeBuilder`](builder::CodeBuilder))
//! - [`render`] - Type name resolution and generic argument rendering
//! - [`visitor`] - Property and declaration visitors
//! - [`processor`] - One generation pass over a [`SymbolSource`](funcgen_symbols::SymbolSource)
//! - [`output`] - Output sinks (filesystem and in-memory)
//! - [`diagnostic`] - Diagnostics and the [`Logger`](diagnostic::Logger) collaborator
//! - [`options`] - Processor options

pub mod builder;
pub mod diagnostic;
mod error;
pub mod options;
pub mod output;
pub mod processor;
pub mod render;
pub mod visitor;

pub use diagnostic::{Diagnostic, DiagnosticLog, Logger, Severity};
pub use error::{Error, Result};
pub use options::Options;
pub use output::{CodeGenerator, FileSpec, FileSystemCodeGenerator, MemoryCodeGenerator};
pub use processor::{FUNCTION_ANNOTATION, FunctionProcessor, ProcessOutcome, RETURNS_ANNOTATION};
