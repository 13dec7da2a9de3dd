//! Validation and lowering of a parsed manifest into symbols.

use std::collections::HashMap;

use funcgen_symbols::{
    Annotation, ClassKind, Declaration, Property, SymbolSet, SymbolTable, TypeReference,
};
use miette::SourceSpan;

use crate::{
    Result,
    manifest::{AnnotationDef, DeclarationDef, Manifest, PropertyDef},
    validate::{ParseContext, find_name_spans, find_value_span},
};

/// Validate the manifest and build the compilation unit it describes.
pub(crate) fn lower(manifest: &Manifest, ctx: &ParseContext<'_>) -> Result<SymbolSet> {
    let source = &manifest.source;
    ctx.validate_qualified(&source.package, "package")?;
    ctx.validate_qualified(&manifest.output.package, "output package")?;
    ctx.validate_name(&manifest.output.file, "output file")?;

    let mut table = SymbolTable::new(source.package.as_str());
    let mut simple_names: HashMap<&str, &str> = HashMap::new();
    for import in &source.imports {
        ctx.validate_qualified(import, "import")?;
        let simple = import.rsplit('.').next().unwrap_or(import.as_str());
        if let Some(previous) = simple_names.insert(simple, import) {
            return Err(ctx.source_context().validation_error(
                format!("import '{}' conflicts with '{}'", import, previous),
                find_value_span(ctx.src(), import),
            ));
        }
        table.import(import.as_str());
    }

    let mut symbols = SymbolSet::new(table);
    let mut seen = HashMap::new();
    for def in &manifest.declarations {
        ctx.validate_name(&def.name, "declaration")?;
        check_duplicate(ctx, &mut seen, &def.name, "declaration")?;
        symbols.push(lower_declaration(def, &source.package, ctx)?);
    }

    Ok(symbols)
}

fn lower_declaration(
    def: &DeclarationDef,
    package: &str,
    ctx: &ParseContext<'_>,
) -> Result<Declaration> {
    let kind = match def.kind.as_deref() {
        None => ClassKind::default(),
        Some(kind) => kind.parse().map_err(|_| {
            ctx.source_context()
                .unknown_kind_error(kind, find_value_span(ctx.src(), kind))
        })?,
    };

    let mut declaration = Declaration::interface(def.name.as_str())
        .kind(kind)
        .package(package);
    for annotation in &def.annotations {
        declaration = declaration.annotated(lower_annotation(annotation));
    }

    let property_ctx = ctx.push(&def.name);
    let mut seen = HashMap::new();
    for property in &def.properties {
        property_ctx.validate_name(&property.name, "property")?;
        check_duplicate(&property_ctx, &mut seen, &property.name, "property")?;
        declaration = declaration.property(lower_property(property, &property_ctx)?);
    }

    Ok(declaration)
}

fn lower_property(def: &PropertyDef, ctx: &ParseContext<'_>) -> Result<Property> {
    let type_reference = def.ty.parse::<TypeReference>().map_err(|e| {
        let span = find_type_span(ctx.src(), &def.ty, e.offset);
        ctx.source_context()
            .invalid_type_error(def.ty.as_str(), e.to_string(), span)
    })?;

    let mut property = Property::new(def.name.as_str(), type_reference);
    for annotation in &def.annotations {
        property = property.annotated(lower_annotation(annotation));
    }
    Ok(property)
}

fn lower_annotation(def: &AnnotationDef) -> Annotation {
    match def {
        AnnotationDef::Marker(name) => Annotation::marker(name.as_str()),
        AnnotationDef::Full { name, arguments } => arguments
            .iter()
            .fold(Annotation::marker(name.as_str()), |annotation, (k, v)| {
                annotation.argument(k.as_str(), v.as_str())
            }),
    }
}

/// Record a name, failing with both locations when it was seen before.
fn check_duplicate<'n>(
    ctx: &ParseContext<'_>,
    seen: &mut HashMap<&'n str, usize>,
    name: &'n str,
    kind: &str,
) -> Result<()> {
    let count = seen.entry(name).or_insert(0);
    *count += 1;
    if *count == 1 {
        return Ok(());
    }

    let spans = find_name_spans(ctx.src(), name);
    Err(ctx.source_context().duplicate_error(
        name,
        ctx.context_for(kind),
        spans.first().copied(),
        spans.get(1).copied(),
    ))
}

/// Point at the failing character inside a quoted type expression.
fn find_type_span(src: &str, ty: &str, offset: usize) -> Option<SourceSpan> {
    let value = find_value_span(src, ty)?;
    let start = value.offset() + offset.min(ty.len().saturating_sub(1));
    Some(SourceSpan::from((start, 1)))
}

#[cfg(test)]
mod tests {
    use funcgen_symbols::{Resolver, SymbolSource};

    use super::*;
    use crate::Error;

    fn lower_str(src: &str) -> Result<SymbolSet> {
        let manifest: Manifest = toml::from_str(src).unwrap();
        lower(&manifest, &ParseContext::new(src, "functions.toml"))
    }

    #[test]
    fn test_lower_declarations_in_order() {
        let symbols = lower_str(
            r#"
[source]
package = "com.example"

[[declarations]]
name = "First"
annotations = [{ name = "Function", arguments = { name = "first" } }]

[[declarations]]
name = "Second"
kind = "object"
annotations = [{ name = "Function", arguments = { name = "second" } }]
"#,
        )
        .unwrap();

        let names: Vec<_> = symbols
            .symbols_with_annotation("Function")
            .iter()
            .map(|d| d.qualified_name())
            .collect();
        assert_eq!(names, ["com.example.First", "com.example.Second"]);
        assert_eq!(symbols.declarations()[1].kind, ClassKind::Object);
        assert_eq!(
            symbols.declarations()[0]
                .annotation("Function")
                .and_then(|a| a.get("name")),
            Some("first")
        );
    }

    #[test]
    fn test_imports_and_local_declarations_resolve() {
        let symbols = lower_str(
            r#"
[source]
package = "com.example"
imports = ["com.example.model.User"]

[[declarations]]
name = "Local"
"#,
        )
        .unwrap();

        let resolver = symbols.resolver();
        assert_eq!(
            resolver.qualified_name("User").as_deref(),
            Some("com.example.model.User")
        );
        assert_eq!(
            resolver.qualified_name("Local").as_deref(),
            Some("com.example.Local")
        );
    }

    #[test]
    fn test_keyword_declaration_name() {
        let err = lower_str("[[declarations]]\nname = \"fun\"\n").unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { ref name, .. } if name == "fun"));
    }

    #[test]
    fn test_duplicate_declaration() {
        let src = "[[declarations]]\nname = \"A\"\n\n[[declarations]]\nname = \"A\"\n";
        let err = lower_str(src).unwrap_err();
        match *err {
            Error::Duplicate {
                first_span,
                second_span,
                ref context,
                ..
            } => {
                assert_eq!(context, "declaration");
                assert_eq!(first_span.map(|s| s.offset()), Some(25));
                assert_eq!(second_span.map(|s| s.offset()), Some(54));
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_declaration_ignores_function_names() {
        let src = "[[declarations]]\nname = \"A\"\nannotations = [{ name = \"Function\", arguments = { name = \"A\" } }]\n\n[[declarations]]\nname = \"A\"\n";
        let err = lower_str(src).unwrap_err();
        match *err {
            Error::Duplicate {
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(first_span.map(|s| s.offset()), Some(25));
                assert_eq!(
                    second_span.map(|s| s.offset()),
                    Some(src.rfind("\"A\"").unwrap() + 1)
                );
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_property() {
        let src = r#"
[[declarations]]
name = "Example"

[[declarations.properties]]
name = "x"
type = "Int"

[[declarations.properties]]
name = "x"
type = "String"
"#;
        let err = lower_str(src).unwrap_err();
        assert!(
            matches!(*err, Error::Duplicate { ref context, .. } if context == "property in 'Example'")
        );
    }

    #[test]
    fn test_invalid_type_points_at_failure() {
        let src = "[[declarations]]\nname = \"E\"\n\n[[declarations.properties]]\nname = \"x\"\ntype = \"Map<String; Int>\"\n";
        let err = lower_str(src).unwrap_err();
        match *err {
            Error::InvalidType { ref ty, span, .. } => {
                assert_eq!(ty, "Map<String; Int>");
                let quoted = src.find("\"Map<").unwrap() + 1;
                assert_eq!(span.map(|s| s.offset()), Some(quoted + 10));
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = lower_str("[[declarations]]\nname = \"A\"\nkind = \"struct\"\n").unwrap_err();
        assert!(matches!(*err, Error::UnknownKind { ref kind, .. } if kind == "struct"));
    }

    #[test]
    fn test_conflicting_imports() {
        let err = lower_str(
            "[source]\nimports = [\"com.a.User\", \"com.b.User\"]\n",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "import 'com.b.User' conflicts with 'com.a.User'");
    }

    #[test]
    fn test_invalid_package() {
        let err = lower_str("[source]\npackage = \"com..example\"\n").unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }
}
