use thiserror::Error;

/// A convenience `Result` alias using [`ParleyError`].
pub type ParleyResult<T> = Result<T, ParleyError>;

/// Top-level error type for Parley.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Error, Debug)]
pub enum ParleyError {
    /// The intent catalog is malformed or violates a load-time rule.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A pattern in the catalog failed to compile.
    #[error("Invalid pattern '{pattern}' in intent '{intent}': {source}")]
    Pattern {
        /// Name of the intent that owns the pattern.
        intent: String,
        /// The pattern text as written in the catalog.
        pattern: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
