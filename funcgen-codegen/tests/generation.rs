//! End-to-end generation passes over in-memory symbol sets.

use funcgen_codegen::{
    DiagnosticLog, Error, FunctionProcessor, MemoryCodeGenerator, Options, ProcessOutcome,
    processor::{FUNCTION_ANNOTATION, NAME_ARGUMENT, RETURNS_ANNOTATION},
};
use funcgen_symbols::{Annotation, ClassKind, Declaration, Property, SymbolSet, SymbolTable};

const OUTPUT: &str = "GeneratedFunctions.kt";

fn function(name: &str) -> Annotation {
    Annotation::marker(FUNCTION_ANNOTATION).argument(NAME_ARGUMENT, name)
}

fn returns() -> Annotation {
    Annotation::marker(RETURNS_ANNOTATION)
}

fn property(name: &str, ty: &str) -> Property {
    Property::new(name, ty.parse().expect("type should parse"))
}

/// Run one pass and return the generated text with the processor's diagnostics.
fn generate(source: &SymbolSet, options: Options) -> (String, ProcessOutcome, DiagnosticLog) {
    let mut codegen = MemoryCodeGenerator::new();
    let mut processor = FunctionProcessor::new(options);
    let outcome = processor
        .process(source, &mut codegen)
        .expect("generation should succeed");
    let text = codegen.file(OUTPUT).unwrap_or_default().to_string();
    (text, outcome, processor.into_logger())
}

#[test]
fn test_example_without_return() {
    // Root-package primitives so qualified names equal written names.
    let mut table = SymbolTable::empty("");
    table.declare("String").declare("Int");
    let source = SymbolSet::new(table).with(
        Declaration::interface("Example")
            .annotated(function("make"))
            .property(property("x", "String"))
            .property(property("y", "Int?")),
    );

    let (text, _, log) = generate(&source, Options::default());
    assert!(log.diagnostics().is_empty());
    assert_eq!(
        text,
        "\nfun make(\n    x: String,\n    y: Int?,\n) {\n    println(\"$x\")\n    println(\"$y\")\n}\n"
    );
}

#[test]
fn test_readme_example() {
    let source = SymbolSet::default()
        .with(
            Declaration::interface("MyAmazingFunction")
                .annotated(function("myAmazingFunction"))
                .property(property("name", "String"))
                .property(property("args", "Map<String, List<*>>"))
                .property(property("end", "Pair<String, Boolean>").annotated(returns())),
        )
        .with(Declaration::interface("MyNewFunction").annotated(function("new")));

    let (text, outcome, log) = generate(&source, Options::default());
    assert!(log.diagnostics().is_empty());
    assert_eq!(outcome.functions, 2);

    let expected = r#"
fun myAmazingFunction(
    name: kotlin.String,
    args: kotlin.collections.Map<kotlin.String, kotlin.collections.List<*>>,
    end: kotlin.Pair<kotlin.String, kotlin.Boolean>,
): kotlin.Pair<kotlin.String, kotlin.Boolean> {
    println("$name")
    println("$args")
    println("$end")
    return end
}

fun new() {
    println("Hello from new")
}
"#;
    assert_eq!(text, expected);
}

#[test]
fn test_property_order_is_preserved() {
    let source = SymbolSet::default().with(
        Declaration::interface("Ordered")
            .annotated(function("ordered"))
            .property(property("name", "String"))
            .property(property("args", "List<String>"))
            .property(property("end", "Int")),
    );

    let (text, _, _) = generate(&source, Options::default());
    let name = text.find("    name:").unwrap();
    let args = text.find("    args:").unwrap();
    let end = text.find("    end:").unwrap();
    assert!(name < args && args < end);

    let name = text.find("println(\"$name\")").unwrap();
    let args = text.find("println(\"$args\")").unwrap();
    let end = text.find("println(\"$end\")").unwrap();
    assert!(name < args && args < end);
}

#[test]
fn test_no_return_marker_has_no_return() {
    let source = SymbolSet::default().with(
        Declaration::interface("Example")
            .annotated(function("make"))
            .property(property("x", "String")),
    );

    let (text, _, _) = generate(&source, Options::default());
    assert!(text.contains(",\n) {\n"));
    assert!(!text.contains("return"));
}

#[test]
fn test_ignore_generic_args_at_every_depth() {
    let source = SymbolSet::default().with(
        Declaration::interface("Example")
            .annotated(function("make"))
            .property(property("pair", "Pair<String, List<Int>>"))
            .property(property("nested", "Map<out List<Map<String, Int>>, *>?"))
            .property(property("plain", "String")),
    );

    let (text, _, _) = generate(&source, Options::new().ignore_generic_args(true));
    assert!(text.contains("    pair: kotlin.Pair<*, *>,\n"));
    assert!(text.contains("    nested: kotlin.collections.Map<*, *>?,\n"));
    assert!(text.contains("    plain: kotlin.String,\n"));
}

#[test]
fn test_variance_nullability_and_star() {
    let mut table = SymbolTable::default();
    table.declare("Foo");
    let source = SymbolSet::new(table).with(
        Declaration::interface("Example")
            .annotated(function("make"))
            .property(property("producer", "List<out Foo?>"))
            .property(property("consumer", "Comparable<in Foo>"))
            .property(property("anything", "List<*>")),
    );

    let (text, _, _) = generate(&source, Options::default());
    assert!(text.contains("    producer: kotlin.collections.List<out Foo?>,\n"));
    assert!(text.contains("    consumer: kotlin.Comparable<in Foo>,\n"));
    assert!(text.contains("    anything: kotlin.collections.List<*>,\n"));
}

#[test]
fn test_wrong_kind_is_skipped_between_valid_declarations() {
    let source = SymbolSet::default()
        .with(Declaration::interface("Before").annotated(function("before")))
        .with(
            Declaration::interface("Skipped")
                .kind(ClassKind::Object)
                .annotated(function("skipped")),
        )
        .with(Declaration::interface("After").annotated(function("after")));

    let (text, outcome, log) = generate(&source, Options::default());
    assert_eq!(
        text,
        "\nfun before() {\n    println(\"Hello from before\")\n}\n\nfun after() {\n    println(\"Hello from after\")\n}\n"
    );
    assert_eq!(outcome.functions, 2);
    assert_eq!(outcome.skipped, ["Skipped"]);
    assert_eq!(log.error_count(), 1);
}

#[test]
fn test_ambiguous_return_aborts_pass() {
    let source = SymbolSet::default()
        .with(
            Declaration::interface("Ambiguous")
                .annotated(function("ambiguous"))
                .property(property("a", "Int").annotated(returns()))
                .property(property("b", "String").annotated(returns())),
        )
        .with(Declaration::interface("Later").annotated(function("later")));

    let mut codegen = MemoryCodeGenerator::new();
    let mut processor = FunctionProcessor::new(Options::default());
    let err = processor.process(&source, &mut codegen).unwrap_err();

    assert!(matches!(
        err,
        Error::AmbiguousReturn { ref declaration, count: 2 } if declaration == "Ambiguous"
    ));
    assert_eq!(codegen.closed(), 1);
    assert_eq!(codegen.file(OUTPUT), Some(""));
}

#[test]
fn test_missing_name_aborts_pass() {
    let source = SymbolSet::default()
        .with(Declaration::interface("Nameless").annotated(Annotation::marker(FUNCTION_ANNOTATION)));

    let mut codegen = MemoryCodeGenerator::new();
    let mut processor = FunctionProcessor::new(Options::default());
    let err = processor.process(&source, &mut codegen).unwrap_err();

    assert_eq!(
        err.to_string(),
        "@Function on 'Nameless' is missing required argument 'name'"
    );
    assert_eq!(codegen.closed(), 1);
}

#[test]
fn test_unresolvable_property_keeps_output_balanced() {
    let source = SymbolSet::default().with(
        Declaration::interface("Example")
            .annotated(function("make"))
            .property(property("widget", "Widget"))
            .property(property("count", "Int")),
    );

    let (text, outcome, log) = generate(&source, Options::default());
    assert_eq!(
        text,
        "\nfun make(\n    widget,\n    count: kotlin.Int,\n) {\n    println(\"$widget\")\n    println(\"$count\")\n}\n"
    );
    assert_eq!(text.matches('{').count(), text.matches('}').count());
    assert_eq!(outcome.deferred, ["Example"]);
    assert_eq!(log.error_count(), 1);
}
