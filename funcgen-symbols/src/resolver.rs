//! Resolution of written type names to qualified declaration names.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{
    TypeArgument, TypeReference,
    known::{DEFAULT_IMPORTS, STANDARD_DECLARATIONS},
};

/// A type reference whose declaration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType<'a> {
    pub qualified_name: String,
    /// Generic arguments as written at the use site.
    pub arguments: &'a [TypeArgument],
    pub nullable: bool,
}

/// The written name has no known declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolvable type '{name}'")]
pub struct Unresolved {
    pub name: String,
}

/// Maps written type names to fully qualified declaration names.
pub trait Resolver {
    /// Qualified name of the declaration a written name refers to.
    fn qualified_name(&self, written: &str) -> Option<String>;

    /// Resolve a type reference.
    ///
    /// Only the reference's own name is looked up; nested arguments are left
    /// for the caller to resolve one by one.
    fn resolve<'a>(&self, reference: &'a TypeReference) -> Result<ResolvedType<'a>, Unresolved> {
        match self.qualified_name(&reference.name) {
            Some(qualified_name) => Ok(ResolvedType {
                qualified_name,
                arguments: &reference.arguments,
                nullable: reference.nullable,
            }),
            None => Err(Unresolved {
                name: reference.name.clone(),
            }),
        }
    }
}

/// Known declarations of one compilation unit plus its import scope.
///
/// Simple names are looked up in explicit imports first, then the unit's own
/// package, then the default imports. Dotted names must match a known
/// declaration exactly.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    package: String,
    known: HashSet<String>,
    imports: HashMap<String, String>,
}

impl SymbolTable {
    /// Create a table for the given package, seeded with the standard declarations.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            known: STANDARD_DECLARATIONS.iter().map(|s| s.to_string()).collect(),
            imports: HashMap::new(),
        }
    }

    /// Create a table with no known declarations at all.
    pub fn empty(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            known: HashSet::new(),
            imports: HashMap::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Register a declaration by qualified name.
    pub fn declare(&mut self, qualified_name: impl Into<String>) -> &mut Self {
        self.known.insert(qualified_name.into());
        self
    }

    /// Import a qualified name, making its last segment visible as a simple name.
    ///
    /// The imported name is also registered as known.
    pub fn import(&mut self, qualified_name: impl Into<String>) -> &mut Self {
        let qualified_name = qualified_name.into();
        let simple = simple_name(&qualified_name).to_string();
        self.known.insert(qualified_name.clone());
        self.imports.insert(simple, qualified_name);
        self
    }

    pub fn is_known(&self, qualified_name: &str) -> bool {
        self.known.contains(qualified_name)
    }

    fn in_package(&self, package: &str, simple: &str) -> Option<String> {
        let candidate = if package.is_empty() {
            simple.to_string()
        } else {
            format!("{}.{}", package, simple)
        };
        self.known.contains(&candidate).then_some(candidate)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new("")
    }
}

impl Resolver for SymbolTable {
    fn qualified_name(&self, written: &str) -> Option<String> {
        if written.contains('.') {
            return self.is_known(written).then(|| written.to_string());
        }

        if let Some(imported) = self.imports.get(written) {
            return Some(imported.clone());
        }

        self.in_package(&self.package, written).or_else(|| {
            DEFAULT_IMPORTS
                .iter()
                .find_map(|package| self.in_package(package, written))
        })
    }
}

fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}
