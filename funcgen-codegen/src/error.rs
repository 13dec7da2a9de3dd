use std::path::PathBuf;

use thiserror::Error;

/// Result type for generation passes.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole generation pass.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Can't use @Returns on more than one property (found {count} in '{declaration}')")]
    AmbiguousReturn { declaration: String, count: usize },

    #[error("'{declaration}' is not annotated with @{annotation}")]
    MissingAnnotation {
        declaration: String,
        annotation: String,
    },

    #[error("@{annotation} on '{declaration}' is missing required argument '{argument}'")]
    MissingArgument {
        declaration: String,
        annotation: String,
        argument: String,
    },

    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
