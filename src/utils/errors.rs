//! Error types for the named-dimension layer.
//!
//! All failures are synchronous and raised at the point of detection.
//! Failures reported by the algebra backend (out-of-range dimension
//! references) propagate unchanged; there is no retry and no recovery.

use thiserror::Error;

use crate::algebra::space::DimType;

/// Top-level error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolySetError {
    /// Caller supplied a self-contradictory combination of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two dimensions of checked kinds resolve to the same name.
    #[error("non-unique var name '{0}' encountered")]
    DuplicateName(String),

    /// A coefficient-mapping key has no corresponding dimension.
    #[error("unknown var name '{0}'")]
    UnknownName(String),

    /// The algebra backend rejected an out-of-range dimension reference.
    #[error("index {index} out of range for {tp} dimensions (size {size})")]
    DimOutOfRange {
        /// Kind of the offending dimension reference.
        tp: DimType,
        /// The rejected index.
        index: usize,
        /// Number of dimensions of that kind.
        size: usize,
    },
}

/// Result type using [`PolySetError`].
pub type PolyResult<T> = Result<T, PolySetError>;
