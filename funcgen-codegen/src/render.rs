//! Rendering of type references into Kotlin type signatures.
//!
//! Rendering walks the generic argument tree with an explicit work stack, so
//! arbitrarily deep nesting (`List<List<List<...>>>`) cannot overflow the
//! call stack. The `suppress_generics` flag is passed down explicitly.

use funcgen_symbols::{Resolver, TypeArgument, TypeReference, Unresolved};

use crate::diagnostic::Logger;

/// Renders type references using a [`Resolver`] for qualified names.
#[derive(Clone, Copy)]
pub struct TypeRenderer<'a> {
    resolver: &'a dyn Resolver,
}

/// Pending work for the argument renderer.
enum Step<'t> {
    Arguments(&'t [TypeArgument]),
    Argument(&'t TypeArgument),
    Text(&'static str),
}

impl<'a> TypeRenderer<'a> {
    pub fn new(resolver: &'a dyn Resolver) -> Self {
        Self { resolver }
    }

    /// Render a full type: qualified name, generic clause and nullability.
    ///
    /// Fails only when the reference's own name cannot be resolved. Unresolved
    /// names nested inside the generic clause are logged against `symbol` and
    /// leave their slot empty.
    pub fn render_type(
        &self,
        reference: &TypeReference,
        suppress_generics: bool,
        symbol: &str,
        logger: &mut dyn Logger,
    ) -> Result<String, Unresolved> {
        let resolved = self.resolver.resolve(reference)?;

        let mut rendered = resolved.qualified_name;
        rendered.push_str(&self.render_arguments(
            resolved.arguments,
            suppress_generics,
            symbol,
            logger,
        ));
        if resolved.nullable {
            rendered.push('?');
        }
        Ok(rendered)
    }

    /// Render a generic argument clause such as `<kotlin.String, out kotlin.Int?>`.
    ///
    /// Returns an empty string when there are no arguments.
    pub fn render_arguments(
        &self,
        arguments: &[TypeArgument],
        suppress_generics: bool,
        symbol: &str,
        logger: &mut dyn Logger,
    ) -> String {
        let mut out = String::new();
        let mut stack = vec![Step::Arguments(arguments)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => out.push_str(text),
                Step::Arguments([]) => {}
                Step::Arguments(arguments) => {
                    out.push('<');
                    stack.push(Step::Text(">"));
                    for (index, argument) in arguments.iter().enumerate().rev() {
                        stack.push(Step::Argument(argument));
                        if index > 0 {
                            stack.push(Step::Text(", "));
                        }
                    }
                }
                Step::Argument(argument) => {
                    if suppress_generics {
                        out.push('*');
                        continue;
                    }

                    let (prefix, reference) = match argument {
                        TypeArgument::Star => {
                            out.push('*');
                            continue;
                        }
                        TypeArgument::Invariant(reference) => ("", reference),
                        TypeArgument::Covariant(reference) => ("out ", reference),
                        TypeArgument::Contravariant(reference) => ("in ", reference),
                    };

                    match self.resolver.resolve(reference) {
                        Ok(resolved) => {
                            out.push_str(prefix);
                            out.push_str(&resolved.qualified_name);
                            if resolved.nullable {
                                stack.push(Step::Text("?"));
                            }
                            stack.push(Step::Arguments(resolved.arguments));
                        }
                        Err(unresolved) => {
                            logger.error(
                                &format!("Invalid type argument '{}'", unresolved.name),
                                symbol,
                            );
                        }
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use funcgen_symbols::SymbolTable;

    use super::*;
    use crate::DiagnosticLog;

    fn render(src: &str, suppress: bool) -> (Result<String, Unresolved>, DiagnosticLog) {
        let table = SymbolTable::default();
        let renderer = TypeRenderer::new(&table);
        let reference: TypeReference = src.parse().expect("type should parse");
        let mut log = DiagnosticLog::new();
        let rendered = renderer.render_type(&reference, suppress, "Test.prop", &mut log);
        (rendered, log)
    }

    fn render_ok(src: &str, suppress: bool) -> String {
        let (rendered, log) = render(src, suppress);
        assert!(!log.has_errors(), "unexpected diagnostics: {:?}", log.diagnostics());
        rendered.expect("type should resolve")
    }

    #[test]
    fn test_simple_types() {
        assert_eq!(render_ok("String", false), "kotlin.String");
        assert_eq!(render_ok("Int?", false), "kotlin.Int?");
    }

    #[test]
    fn test_empty_arguments_render_nothing() {
        let table = SymbolTable::default();
        let renderer = TypeRenderer::new(&table);
        let mut log = DiagnosticLog::new();
        assert_eq!(renderer.render_arguments(&[], false, "x", &mut log), "");
        assert_eq!(renderer.render_arguments(&[], true, "x", &mut log), "");
    }

    #[test]
    fn test_nested_generics() {
        assert_eq!(
            render_ok("Map<String, List<*>>", false),
            "kotlin.collections.Map<kotlin.String, kotlin.collections.List<*>>"
        );
    }

    #[test]
    fn test_variance_and_nullability() {
        assert_eq!(
            render_ok("List<out Int?>", false),
            "kotlin.collections.List<out kotlin.Int?>"
        );
        assert_eq!(
            render_ok("Comparator<in Number>?", false),
            "kotlin.comparisons.Comparator<in kotlin.Number>?"
        );
        assert_eq!(
            render_ok("Pair<out List<String?>?, Int>", false),
            "kotlin.Pair<out kotlin.collections.List<kotlin.String?>?, kotlin.Int>"
        );
    }

    #[test]
    fn test_star_projection() {
        assert_eq!(
            render_ok("List<*>?", false),
            "kotlin.collections.List<*>?"
        );
    }

    #[test]
    fn test_suppressed_generics() {
        assert_eq!(
            render_ok("Map<String, List<Int>>", true),
            "kotlin.collections.Map<*, *>"
        );
        assert_eq!(
            render_ok("Pair<out Int?, *>?", true),
            "kotlin.Pair<*, *>?"
        );
        assert_eq!(render_ok("String", true), "kotlin.String");
    }

    #[test]
    fn test_suppression_does_not_resolve_arguments() {
        let (rendered, log) = render("List<Missing>", true);
        assert_eq!(rendered.as_deref(), Ok("kotlin.collections.List<*>"));
        assert!(log.diagnostics().is_empty());
    }

    #[test]
    fn test_unresolved_top_level() {
        let (rendered, _) = render("Widget<String>", false);
        assert_eq!(
            rendered,
            Err(Unresolved {
                name: "Widget".into()
            })
        );
    }

    #[test]
    fn test_unresolved_argument_leaves_empty_slot() {
        let (rendered, log) = render("Map<Widget, Int>", false);
        assert_eq!(
            rendered.as_deref(),
            Ok("kotlin.collections.Map<, kotlin.Int>")
        );
        let error = log.errors().next().expect("error expected");
        assert_eq!(error.message, "Invalid type argument 'Widget'");
        assert_eq!(error.symbol.as_deref(), Some("Test.prop"));
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 10_000;
        let mut reference = TypeReference::named("Int");
        for _ in 0..depth {
            reference = TypeReference::named("List").with_argument(TypeArgument::Invariant(reference));
        }

        let table = SymbolTable::default();
        let renderer = TypeRenderer::new(&table);
        let mut log = DiagnosticLog::new();
        let rendered = renderer
            .render_type(&reference, false, "Deep.prop", &mut log)
            .expect("type should resolve");

        assert!(rendered.starts_with("kotlin.collections.List<kotlin.collections.List<"));
        assert!(rendered.ends_with(&format!("kotlin.Int{}", ">".repeat(depth))));

        // Iterative teardown for the deep tree.
        let mut pending = vec![reference];
        while let Some(mut current) = pending.pop() {
            for argument in current.arguments.drain(..) {
                if let TypeArgument::Invariant(inner) = argument {
                    pending.push(inner);
                }
            }
        }
    }
}
