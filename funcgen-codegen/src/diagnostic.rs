//! Diagnostics reported while generating functions.
//!
//! The generator never prints directly. Problems that do not abort a pass are
//! handed to a [`Logger`] attributed to the symbol they concern.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A problem that caused a declaration or type to be skipped.
    Error,
    /// A warning that doesn't prevent processing but should be addressed.
    Warning,
    /// Informational message about the generation pass.
    Info,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// The symbol the message is about (e.g., "com.example.Make.args").
    pub symbol: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a new info diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            symbol: None,
        }
    }

    /// Attribute this diagnostic to a symbol.
    pub fn at(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(symbol) = &self.symbol {
            write!(f, " (at {})", symbol)?;
        }
        Ok(())
    }
}

/// Receives diagnostics from the generator.
pub trait Logger {
    fn log(&mut self, diagnostic: Diagnostic);

    fn error(&mut self, message: &str, symbol: &str) {
        self.log(Diagnostic::error(message).at(symbol));
    }

    fn warn(&mut self, message: &str, symbol: &str) {
        self.log(Diagnostic::warning(message).at(symbol));
    }

    fn info(&mut self, message: &str, symbol: &str) {
        self.log(Diagnostic::info(message).at(symbol));
    }
}

/// Collects diagnostics and mirrors them as `tracing` events.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Logger for DiagnosticLog {
    fn log(&mut self, diagnostic: Diagnostic) {
        let symbol = diagnostic.symbol.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Error => tracing::error!(symbol, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(symbol, "{}", diagnostic.message),
            Severity::Info => tracing::info!(symbol, "{}", diagnostic.message),
        }
        self.diagnostics.push(diagnostic);
    }
}
