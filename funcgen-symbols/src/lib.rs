//! Symbol model for the funcgen function generator.
//!
//! This crate holds the read-only view of annotated source declarations that
//! the generator consumes:
//!
//! - [`Declaration`], [`Property`], [`Annotation`] - annotated declarations
//! - [`TypeReference`], [`TypeArgument`], [`Variance`] - written type mentions
//! - [`Resolver`], [`SymbolTable`] - mapping written names to qualified names
//! - [`SymbolSource`], [`SymbolSet`] - discovery of annotated declarations

mod declaration;
mod known;
mod resolver;
mod source;
mod types;

pub use declaration::{Annotation, ClassKind, Declaration, Property};
pub use known::DEFAULT_IMPORTS;
pub use resolver::{ResolvedType, Resolver, SymbolTable, Unresolved};
pub use source::{SymbolSet, SymbolSource};
pub use types::{ParseTypeError, TypeArgument, TypeReference, Variance};
