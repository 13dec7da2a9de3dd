//! Annotated declarations and their properties.

use std::{fmt, str::FromStr};

use crate::TypeReference;

/// The kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Interface,
    Class,
    EnumClass,
    EnumEntry,
    Object,
    AnnotationClass,
}

impl ClassKind {
    /// All kinds, in declaration order.
    pub const ALL: [ClassKind; 6] = [
        Self::Interface,
        Self::Class,
        Self::EnumClass,
        Self::EnumEntry,
        Self::Object,
        Self::AnnotationClass,
    ];

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Class => "class",
            Self::EnumClass => "enum_class",
            Self::EnumEntry => "enum_entry",
            Self::Object => "object",
            Self::AnnotationClass => "annotation_class",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown declaration kind '{}'", s))
    }
}

/// An annotation applied to a declaration or property.
///
/// Only the short name is kept; argument values are stored in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub short_name: String,
    pub arguments: Vec<(String, String)>,
}

impl Annotation {
    /// Create an annotation without arguments.
    pub fn marker(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            arguments: Vec::new(),
        }
    }

    /// Add a named argument.
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Look up the value of a named argument.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A property declared on an annotated declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub type_reference: TypeReference,
    pub annotations: Vec<Annotation>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_reference: TypeReference) -> Self {
        Self {
            name: name.into(),
            type_reference,
            annotations: Vec::new(),
        }
    }

    /// Add an annotation to this property.
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Number of annotations with the given short name.
    pub fn annotation_count(&self, short_name: &str) -> usize {
        self.annotations
            .iter()
            .filter(|a| a.short_name == short_name)
            .count()
    }

    pub fn has_annotation(&self, short_name: &str) -> bool {
        self.annotation_count(short_name) > 0
    }
}

/// A class-like declaration together with its annotations and properties.
///
/// Properties keep their declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub package: String,
    pub kind: ClassKind,
    pub annotations: Vec<Annotation>,
    pub properties: Vec<Property>,
}

impl Declaration {
    /// Create an interface declaration in the root package.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            kind: ClassKind::Interface,
            annotations: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Set the declaration kind.
    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the package.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Add an annotation.
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a property.
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// The package-qualified name (`com.example.Foo`, or `Foo` in the root package).
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Get the first annotation with the given short name.
    pub fn annotation(&self, short_name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.short_name == short_name)
    }

    pub fn has_annotation(&self, short_name: &str) -> bool {
        self.annotation(short_name).is_some()
    }
}
