//! Serde model of `functions.toml`.
//!
//! ```toml
//! [source]
//! package = "com.example"
//! imports = ["com.example.model.User"]
//!
//! [options]
//! ignoreGenericArgs = true
//!
//! [output]
//! file = "GeneratedFunctions"
//!
//! [[declarations]]
//! name = "CreateUser"
//! annotations = [{ name = "Function", arguments = { name = "createUser" } }]
//!
//! [[declarations.properties]]
//! name = "user"
//! type = "User"
//! annotations = ["Returns"]
//! ```

use std::str::FromStr;

use funcgen_symbols::SymbolSet;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext, lower, validate::ParseContext};

/// File name looked up when no path is given.
pub const DEFAULT_FILENAME: &str = "functions.toml";

fn default_file() -> String {
    "GeneratedFunctions".to_string()
}

/// Root of `functions.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub source: SourceConfig,

    /// Processor options, passed through as strings.
    #[serde(default)]
    pub options: IndexMap<String, toml::Value>,

    #[serde(default)]
    pub output: OutputConfig,

    /// Declarations in source order.
    #[serde(default)]
    pub declarations: Vec<DeclarationDef>,
}

/// The compilation unit the declarations belong to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Package of every declaration; empty for the root package.
    #[serde(default)]
    pub package: String,

    /// Explicit imports, as qualified names.
    #[serde(default)]
    pub imports: Vec<String>,
}

/// Where the generated file goes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub package: String,

    /// File name without the `.kt` extension.
    #[serde(default = "default_file")]
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            package: String::new(),
            file: default_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationDef {
    pub name: String,

    /// Declaration kind; `interface` when absent.
    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDef>,

    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDef {
    pub name: String,

    /// Declared type, e.g. `Map<String, List<*>>?`.
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub annotations: Vec<AnnotationDef>,
}

/// An annotation, either a bare marker name or a table with arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnnotationDef {
    Marker(String),
    Full {
        name: String,
        #[serde(default)]
        arguments: IndexMap<String, String>,
    },
}

impl AnnotationDef {
    pub fn name(&self) -> &str {
        match self {
            AnnotationDef::Marker(name) => name,
            AnnotationDef::Full { name, .. } => name,
        }
    }
}

impl Manifest {
    /// Parse a functions.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename).map(|(manifest, _)| manifest)
    }

    /// Processor options as strings, in file order.
    ///
    /// String values are taken verbatim; other values use their TOML
    /// rendering, so `true` becomes `"true"`.
    pub fn option_strings(&self) -> IndexMap<String, String> {
        self.options
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Parse and validate a manifest, returning it with the symbols it declares.
pub(crate) fn parse_manifest(content: &str, filename: &str) -> Result<(Manifest, SymbolSet)> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    // Lowering performs every name, kind and type check.
    let symbols = lower::lower(&manifest, &ParseContext::new(content, filename))?;
    Ok((manifest, symbols))
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_FILENAME)
    }
}
