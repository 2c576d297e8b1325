//! Error types for the store crate.

/// Errors from parsing or persisting an [`Ini`](crate::Ini).
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    /// Failure from the underlying I/O layer, surfaced unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A non-blank, non-comment, non-header line without a key/value separator.
    #[error("`{line}` is not a valid key/value pair")]
    Format {
        /// The offending line, after whitespace trimming.
        line: String,
    },
}

impl IniError {
    /// The offending line for format errors.
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Format { line } => Some(line),
            Self::Io(_) => None,
        }
    }
}

/// Result alias for store operations.
pub type IniResult<T> = Result<T, IniError>;
