//! Error type for table generation and verification.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the generator. None are recovered locally.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The requested table has no entries.
    #[error("table size must be at least 1, got {0}")]
    InvalidSize(usize),

    /// Reading or writing a generated file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A generated file holds a different number of case arms than expected.
    #[error("expected {expected} case arms, found {found}")]
    ArmCount {
        /// Entries in the freshly computed table.
        expected: usize,
        /// Numbered arms parsed from the file.
        found: usize,
    },

    /// A case arm disagrees with the freshly computed table.
    #[error("case arm {position} is `{index}: {found}`, expected `{position}: {expected}`")]
    ArmMismatch {
        /// Position of the arm in the case statement.
        position: usize,
        /// Address the arm was written for.
        index: usize,
        /// Value the arm holds.
        found: u64,
        /// Value the table holds at `position`.
        expected: u32,
    },

    /// The file differs from the rendered module outside the numbered arms
    /// (header, default arm, or closing lines).
    #[error("line {line} differs from the generated module")]
    LineMismatch {
        /// 1-based line number of the first difference.
        line: usize,
    },
}
