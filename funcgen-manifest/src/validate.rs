//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Nested contexts share the source and extend a path used in error
/// messages, e.g. "property in 'CreateUser'".
#[derive(Debug, Clone)]
pub(crate) struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe what is being validated, e.g. "property in 'CreateUser'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src(), name)
    }

    /// Validate that a name is a usable Kotlin identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_kotlin_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Validate a dotted name such as a package or an import.
    ///
    /// An empty package is the root package and is accepted.
    pub fn validate_qualified(&self, name: &str, kind: &str) -> Result<()> {
        if name.is_empty() {
            return Ok(());
        }
        for segment in name.split('.') {
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    name,
                    self.context_for(kind),
                    reason,
                    find_value_span(self.src(), name),
                ));
            }
        }
        Ok(())
    }
}

/// Kotlin hard keywords, which cannot be used as identifiers.
pub(crate) const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

pub(crate) fn is_kotlin_keyword(name: &str) -> bool {
    KOTLIN_KEYWORDS.contains(&name)
}

/// Find the span of a name in the TOML source.
///
/// Looks for `name = "value"` in either quote style.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    find_name_spans(src, name).into_iter().next()
}

/// Every `name = "value"` key of a name, in source order.
///
/// Only keys that start a line count, so `arguments = { name = "x" }`
/// inside an annotation table is never matched.
pub(crate) fn find_name_spans(src: &str, name: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        let pattern = format!("name = {quote}{name}{quote}");
        spans.extend(
            src.match_indices(&pattern)
                .filter(|(pos, _)| starts_line(src, *pos))
                .map(|(pos, _)| {
                    // The name starts after `name = "` (8 characters)
                    SourceSpan::from((pos + 8, name.len()))
                }),
        );
    }
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Whether only whitespace precedes `pos` on its line.
fn starts_line(src: &str, pos: usize) -> bool {
    src[..pos]
        .chars()
        .rev()
        .take_while(|c| *c != '\n')
        .all(|c| c == ' ' || c == '\t')
}

/// Find the span of a quoted string value anywhere in the source.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

/// Validate that a name is a plain identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("make").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("CreateUser2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
        assert_eq!(
            validate_identifier("2fast"),
            Some("name must start with a letter or underscore")
        );
        assert_eq!(
            validate_identifier("my-function"),
            Some("name must contain only letters, numbers, and underscores")
        );
    }

    #[test]
    fn test_keywords() {
        assert!(is_kotlin_keyword("fun"));
        assert!(is_kotlin_keyword("interface"));
        assert!(!is_kotlin_keyword("value"));
    }

    #[test]
    fn test_find_name_spans() {
        let src = "name = \"A\"\nname = 'B'\nname = \"A\"\n";
        let spans = find_name_spans(src, "A");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].offset(), 8);
        assert_eq!(spans[1].offset(), 30);
        assert_eq!(find_name_span(src, "B").map(|s| s.offset()), Some(19));
        assert!(find_name_span(src, "C").is_none());
    }

    #[test]
    fn test_find_name_spans_skips_annotation_arguments() {
        let src = "annotations = [{ name = \"Function\", arguments = { name = \"A\" } }]\n  name = \"A\"\n";
        let spans = find_name_spans(src, "A");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].offset(), src.rfind("A\"").unwrap());
        assert!(find_name_span(src, "Function").is_none());
    }

    #[test]
    fn test_find_value_span() {
        let src = "package = \"com.example\"\n";
        let span = find_value_span(src, "com.example").unwrap();
        assert_eq!(span.offset(), 11);
        assert_eq!(span.len(), 11);
    }

    #[test]
    fn test_context_for() {
        let ctx = ParseContext::new("", "functions.toml");
        assert_eq!(ctx.context_for("declaration"), "declaration");
        assert_eq!(
            ctx.push("CreateUser").context_for("property"),
            "property in 'CreateUser'"
        );
    }

    #[test]
    fn test_validate_qualified() {
        let ctx = ParseContext::new("package = \"com.2x\"", "functions.toml");
        assert!(ctx.validate_qualified("", "package").is_ok());
        assert!(ctx.validate_qualified("com.example", "package").is_ok());
        assert!(ctx.validate_qualified("com.2x", "package").is_err());
    }
}
