//! Error types for maplens-core

use maplens_source_map::DecodeError;

/// Errors surfaced by the visualization core.
///
/// Most failure paths never reach the host: an undecodable payload becomes an
/// empty index, a missing segment is [`crate::Resolution::NoMatch`], and
/// unavailable geometry skips a frame. What remains is reported here.
#[derive(Debug, thiserror::Error)]
pub enum LensError {
    #[error("Failed to decode source map for {output}: {source}")]
    Decode {
        output: String,
        #[source]
        source: DecodeError,
    },

    #[error("Invalid visualization config: {0}")]
    Config(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LensError>;
