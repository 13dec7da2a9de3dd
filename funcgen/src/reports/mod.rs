//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::CheckReport;
use funcgen_codegen::{Diagnostic, Severity};
pub use generate::{GenerateReport, GenerationResult, PreviewFile};
pub use output::{Output, Report, TerminalOutput};

#[cfg(test)]
pub use output::BufferOutput;

/// Render generator diagnostics, one line each.
fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let text = match &diagnostic.symbol {
            Some(symbol) => format!("{}\n  --> {}", diagnostic.message, symbol),
            None => diagnostic.message.clone(),
        };
        match diagnostic.severity {
            Severity::Error => out.error(&text),
            Severity::Warning => out.warning(&text),
            Severity::Info => out.preformatted(&format!("info: {}", text)),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
