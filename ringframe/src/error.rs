//! Error types for ringframe.

use thiserror::Error;

/// Every failure a ring buffer or frame splitter can report.
///
/// Checked operations validate before mutating, so a returned error means
/// the buffer is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// Buffer constructed with a zero capacity.
    #[error("invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// A byte argument outside `0..=255`.
    #[error("invalid byte value: {0} (must be in 0..=255)")]
    InvalidByteValue(i128),

    /// Front/back index not addressing a stored byte.
    #[error("index {index} out of range for {len} stored bytes")]
    IndexOutOfRange { index: usize, len: usize },

    /// Shift on an empty buffer.
    #[error("buffer is empty")]
    BufferEmpty,

    /// Push without overwrite on a full buffer.
    #[error("buffer is full (capacity {capacity})")]
    BufferFull { capacity: usize },

    /// Sequence shift asking for more bytes than are stored.
    #[error("requested {requested} bytes but only {available} stored")]
    InsufficientData { requested: usize, available: usize },

    /// Sequence shift with a zero count.
    #[error("shift count must not be zero")]
    InvalidCount,

    /// Splitter configured without delimiters or with an empty one.
    #[error("delimiters must be non-empty")]
    EmptyDelimiter,
}

/// Result type alias using RingError.
pub type Result<T> = std::result::Result<T, RingError>;
