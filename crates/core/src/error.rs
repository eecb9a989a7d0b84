//! Error types for huffpack.
//!
//! Every fallible operation returns a structured error instead of panicking.
//! These are data-integrity faults, not transient ones: nothing is retried and
//! nothing is silently repaired.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all operations in the engine.
///
/// Each variant corresponds to a specific failure domain:
/// - Tree construction: no symbol to build a code from
/// - Encoding: the input and the code table disagree
/// - Decoding: the bit string and the tree disagree
/// - Container: the artifact is malformed
/// - I/O: the file collaborator failed
#[derive(Debug, Error)]
pub enum Error {
    /// Frequency table has no entry with a positive count
    #[error("empty alphabet: no symbol with a positive frequency")]
    EmptyAlphabet,

    /// Compression was asked to process zero bytes
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// Input byte has no codeword in the code table
    #[error("symbol {symbol:#04x} at offset {position} has no codeword")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Decoding was requested before any tree was built
    #[error("code tree has not been built")]
    TreeNotBuilt,

    /// Bit string contains a character other than '0' or '1'
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    /// Bit string ended in the middle of a codeword, or decoded to symbol
    /// counts other than the ones recorded with it (`pending` is then 0)
    #[error("bit string does not decode cleanly ({pending} bits of an unfinished codeword)")]
    BitStringMismatch { pending: usize },

    /// A traversal step had no child to descend into
    #[error("bit string does not match code tree at position {position}")]
    TraversalFailure { position: usize },

    /// Artifact could not be parsed
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// File collaborator failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Attach a path to a raw I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Artifact parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// First line does not carry a symbol count
    #[error("missing frequency table size")]
    MissingCount,

    /// Symbol count is not a number in 1..=256
    #[error("invalid frequency table size {0:?}")]
    InvalidCount(String),

    /// Packed header line is malformed
    #[error("invalid packed header {0:?}")]
    InvalidHeader(String),

    /// A frequency row is missing or lacks a field
    #[error("incomplete frequency entry at row {row}")]
    IncompleteRow { row: usize },

    /// Row symbol is not a byte value
    #[error("row {row}: symbol {value:?} is not a byte value")]
    InvalidSymbol { row: usize, value: String },

    /// Row frequency is not a non-negative integer
    #[error("row {row}: invalid frequency")]
    InvalidFrequency { row: usize },

    /// Same symbol listed twice
    #[error("row {row}: duplicate symbol {symbol}")]
    DuplicateSymbol { row: usize, symbol: u8 },

    /// Blank line between table and payload is absent
    #[error("missing separator between frequency table and payload")]
    MissingSeparator,

    /// Nothing follows the separator
    #[error("empty encoded payload")]
    EmptyPayload,

    /// Packed payload byte count disagrees with the header bit length
    #[error("payload length mismatch: header implies {expected} bytes, got {actual}")]
    PayloadLengthMismatch { expected: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
