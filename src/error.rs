//! Error types for matrix construction.

use thiserror::Error;

/// Things that may go wrong while building a [`Matrix`](crate::Matrix).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A row referenced a column outside `1..=columns`.
    #[error("column {column} is out of range; the matrix has columns 1..={columns}")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// A row named the same column more than once.
    #[error("column {column} appears more than once in the row")]
    DuplicateColumn { column: usize },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
