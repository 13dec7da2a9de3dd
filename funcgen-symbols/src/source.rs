//! Discovery of annotated declarations.

use crate::{Declaration, Resolver, SymbolTable};

/// The compilation unit a generation pass runs over.
pub trait SymbolSource {
    /// Declarations carrying an annotation with the given short name, in
    /// source order.
    fn symbols_with_annotation(&self, short_name: &str) -> Vec<&Declaration>;

    /// Resolver for type names used by the declarations.
    fn resolver(&self) -> &dyn Resolver;
}

/// An in-memory compilation unit.
#[derive(Debug, Clone, Default)]
pub struct SymbolSet {
    declarations: Vec<Declaration>,
    table: SymbolTable,
}

impl SymbolSet {
    pub fn new(table: SymbolTable) -> Self {
        Self {
            declarations: Vec::new(),
            table,
        }
    }

    /// Add a declaration, registering its qualified name with the table.
    pub fn push(&mut self, declaration: Declaration) {
        self.table.declare(declaration.qualified_name());
        self.declarations.push(declaration);
    }

    /// Builder form of [`SymbolSet::push`].
    pub fn with(mut self, declaration: Declaration) -> Self {
        self.push(declaration);
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }
}

impl SymbolSource for SymbolSet {
    fn symbols_with_annotation(&self, short_name: &str) -> Vec<&Declaration> {
        self.declarations
            .iter()
            .filter(|d| d.has_annotation(short_name))
            .collect()
    }

    fn resolver(&self) -> &dyn Resolver {
        &self.table
    }
}
