//! Check operation - validation plus a trial pass in memory.

use funcgen_codegen::{FUNCTION_ANNOTATION, MemoryCodeGenerator};
use funcgen_manifest::FunctionsToml;
use funcgen_symbols::SymbolSource;

use super::run_pass;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// The file is already parsed and validated; this runs the generator without
/// touching the disk and collects its diagnostics.
pub fn check(toml: &FunctionsToml, args: &[(String, String)]) -> CheckReport {
    let mut codegen = MemoryCodeGenerator::new();
    let pass = run_pass(toml, args, &mut codegen);

    CheckReport {
        config_path: toml.path().to_path_buf(),
        declarations: toml.symbols().declarations().len(),
        annotated: toml.symbols_with_annotation(FUNCTION_ANNOTATION).len(),
        outcome: pass.outcome,
        diagnostics: pass.diagnostics,
        fatal: pass.fatal,
    }
}

#[cfg(test)]
mod tests {
    use funcgen_codegen::Severity;

    use super::*;

    #[test]
    fn test_check_reports_skipped_and_deferred() {
        let toml: FunctionsToml = r#"
[[declarations]]
name = "Impl"
kind = "class"
annotations = [{ name = "Function", arguments = { name = "impl" } }]

[[declarations]]
name = "Broken"
annotations = [{ name = "Function", arguments = { name = "broken" } }]

[[declarations.properties]]
name = "widget"
type = "Widget"

[[declarations]]
name = "Plain"
"#
        .parse()
        .unwrap();

        let report = check(&toml, &[]);
        assert_eq!(report.declarations, 3);
        assert_eq!(report.annotated, 2);
        assert_eq!(report.outcome.functions, 1);
        assert_eq!(report.outcome.skipped, ["Impl"]);
        assert_eq!(report.outcome.deferred, ["Broken"]);
        assert!(!report.is_valid());

        let messages: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            [
                "Only interfaces can be annotated with @Function",
                "Invalid property type 'Widget'",
            ]
        );
    }

    #[test]
    fn test_unknown_option_is_a_warning() {
        let toml: FunctionsToml = "[options]\nverbose = \"yes\"\n".parse().unwrap();
        let report = check(&toml, &[]);

        assert!(report.is_valid());
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].severity.is_warning());
        assert_eq!(report.outcome.file, None);
    }
}
