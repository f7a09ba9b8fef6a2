use std::fmt::Display;

/// Custom Result type for MiniSQL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for MiniSQL
///
/// Every parser and engine failure maps to one of these variants. None of
/// them are fatal: a failed statement leaves all table state unchanged and
/// the caller is free to submit the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Statement was empty after stripping whitespace and the trailing `;`
    EmptyStatement,
    /// Statement did not match any supported shape
    UnrecognizedStatement(String),
    /// WHERE clause was present but malformed
    InvalidPredicate(String),
    /// INSERT column count does not match value count
    ColumnValueCountMismatch { columns: usize, values: usize },
    /// Statement referenced a table absent from the store
    TableNotLoaded(String),
    /// Statement referenced a column absent from the table
    UnknownColumn(String),
    /// LOAD path could not be opened
    FileNotFound(String),
    /// Comparison operator the engine cannot evaluate (unreachable via the
    /// parser grammar, kept as a boundary check)
    InvalidOperator(String),
    /// Internal error (I/O faults other than a missing file)
    Internal(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Internal(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyStatement => write!(f, "empty statement"),
            Error::UnrecognizedStatement(msg) => write!(f, "unrecognized statement: {}", msg),
            Error::InvalidPredicate(msg) => write!(f, "invalid WHERE clause: {}", msg),
            Error::ColumnValueCountMismatch { columns, values } => write!(
                f,
                "column count {} does not match value count {}",
                columns, values
            ),
            Error::TableNotLoaded(name) => write!(f, "table '{}' is not loaded", name),
            Error::UnknownColumn(name) => write!(f, "unknown column {}", name),
            Error::FileNotFound(path) => write!(f, "file '{}' not found", path),
            Error::InvalidOperator(op) => write!(f, "invalid operator {}", op),
            Error::Internal(msg) => write!(f, "internal error {}", msg),
        }
    }
}
