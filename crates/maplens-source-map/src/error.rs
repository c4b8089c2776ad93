//! Error types for source map decoding

use thiserror::Error;

/// Errors produced while decoding a source map payload.
///
/// None of these reach the user: callers treat a payload that fails to decode
/// as an output file without any mappings.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not a well-formed regular or indexed source map
    #[error("invalid source map: {0}")]
    SourceMap(#[from] sourcemap::Error),

    /// A 0-based line has no 1-based counterpart in `u32`
    #[error("line {0} is out of range")]
    LineOutOfRange(u32),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
