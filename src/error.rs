use thiserror::Error;

/// Error taxonomy for the crate.
///
/// Verification outcome ("did this signature check out?") is *not* part of
/// this enum: every `verify*` routine returns `Result<bool, BlsError>`, where
/// `Ok(false)` is the ordinary negative answer and `Err` is reserved for
/// malformed input the verifier could not even evaluate.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BlsError {
    #[error("decoding error: {0}")]
    DecodingError(&'static str),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("hash-to-curve exhausted its counter space")]
    HashToCurveError,

    #[error("alt-bn128 precompile error: {0}")]
    PrecompileError(&'static str),

    #[error("aggregation error: {0}")]
    AggregationError(&'static str),
}
