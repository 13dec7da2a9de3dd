//! Processor options.
//!
//! Options arrive as a string map, the same shape a build tool passes to an
//! annotation processor. Unrecognized keys and malformed values are reported
//! as warnings and otherwise ignored.

use indexmap::IndexMap;

use crate::diagnostic::Logger;

/// Key of the option that replaces every generic argument with `*`.
pub const IGNORE_GENERIC_ARGS: &str = "ignoreGenericArgs";

/// Recognized processor options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Render every type argument, at any depth, as a star projection.
    pub ignore_generic_args: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`Options::ignore_generic_args`].
    pub fn ignore_generic_args(mut self, ignore: bool) -> Self {
        self.ignore_generic_args = ignore;
        self
    }

    /// Parse options from a string map, reporting problems to `logger`.
    pub fn from_args(args: &IndexMap<String, String>, logger: &mut dyn Logger) -> Self {
        let mut options = Self::default();

        for (key, value) in args {
            let symbol = format!("options.{}", key);
            match key.as_str() {
                IGNORE_GENERIC_ARGS => match parse_flag(value) {
                    Some(flag) => options.ignore_generic_args = flag,
                    None => logger.warn(
                        &format!(
                            "option '{}' expects \"true\" or \"false\", got \"{}\"; using false",
                            key, value
                        ),
                        &symbol,
                    ),
                },
                _ => logger.warn(&format!("unknown option '{}'", key), &symbol),
            }
        }

        options
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
