use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use funcgen_symbols::{Declaration, Resolver, SymbolSet, SymbolSource};
use indexmap::IndexMap;

use crate::{
    Error, Result,
    manifest::{DEFAULT_FILENAME, Manifest, parse_manifest},
};

/// A functions.toml file with its raw content, parsed manifest, and symbols.
pub struct FunctionsToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
    symbols: SymbolSet,
}

impl FunctionsToml {
    /// Open and parse a functions.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let mut file = Self::from_str_with_filename(content, &filename)?;
        file.path = path;
        Ok(file)
    }

    /// Parse content with a custom filename for error reporting.
    pub fn from_str_with_filename(content: String, filename: &str) -> Result<Self> {
        let (manifest, symbols) = parse_manifest(&content, filename)?;
        Ok(Self {
            path: PathBuf::from(filename),
            content,
            manifest,
            symbols,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The compilation unit the file describes.
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Processor options from the `[options]` table.
    pub fn options(&self) -> IndexMap<String, String> {
        self.manifest.option_strings()
    }

    pub fn output_package(&self) -> &str {
        &self.manifest.output.package
    }

    pub fn output_file(&self) -> &str {
        &self.manifest.output.file
    }
}

impl FromStr for FunctionsToml {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s.to_string(), DEFAULT_FILENAME)
    }
}

impl SymbolSource for FunctionsToml {
    fn symbols_with_annotation(&self, short_name: &str) -> Vec<&Declaration> {
        self.symbols.symbols_with_annotation(short_name)
    }

    fn resolver(&self) -> &dyn Resolver {
        self.symbols.resolver()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EXAMPLE: &str = r#"
[source]
package = "com.example"

[output]
package = "com.example.generated"

[[declarations]]
name = "Greeter"
annotations = [{ name = "Function", arguments = { name = "greet" } }]

[[declarations.properties]]
name = "who"
type = "String"
annotations = ["Returns"]

[[declarations]]
name = "Plain"
"#;

    #[test]
    fn test_open() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let toml = FunctionsToml::open(file.path()).unwrap();
        assert_eq!(toml.path(), file.path());
        assert_eq!(toml.content(), EXAMPLE);
        assert_eq!(toml.output_package(), "com.example.generated");
        assert_eq!(toml.output_file(), "GeneratedFunctions");
        assert_eq!(toml.symbols().declarations().len(), 2);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FunctionsToml::open(dir.path().join("functions.toml"))
            .err()
            .unwrap();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_symbol_source() {
        let toml: FunctionsToml = EXAMPLE.parse().unwrap();
        let annotated = toml.symbols_with_annotation("Function");
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].qualified_name(), "com.example.Greeter");
        assert_eq!(
            toml.resolver().qualified_name("Plain").as_deref(),
            Some("com.example.Plain")
        );
    }

    #[test]
    fn test_options_default_to_empty() {
        let toml: FunctionsToml = EXAMPLE.parse().unwrap();
        assert!(toml.options().is_empty());
    }
}
