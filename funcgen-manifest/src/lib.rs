//! `functions.toml` source format.
//!
//! A `functions.toml` file describes the annotated interfaces of one
//! compilation unit. Parsing validates names and type expressions and lowers
//! the file into a [`SymbolSet`](funcgen_symbols::SymbolSet) the generator can
//! run over.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod lower;
mod manifest;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::FunctionsToml;
pub use manifest::{
    AnnotationDef, DEFAULT_FILENAME, DeclarationDef, Manifest, OutputConfig, PropertyDef,
    SourceConfig,
};
