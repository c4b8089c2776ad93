//! Source map decoding and segment indices
//!
//! This crate turns a raw version 3 source map payload into lookup structures
//! that answer "which segment encloses this position" on either side of the
//! mapping. It knows nothing about editors or panes.
//!
//! # Overview
//!
//! - [`decode`]: reads a regular or indexed payload with the `sourcemap`
//!   crate and converts its tokens into [`RawMapping`] records
//! - [`MappingIndex`]: buckets records by generated line and by
//!   (source, original line), ordered by column, with derived segment ends
//!
//! # Example
//!
//! ```rust
//! use maplens_source_map::{MappingIndex, DEFAULT_FALLBACK_WIDTH};
//!
//! let payload = r#"{"version":3,"sources":["src/a.ts"],"names":[],"mappings":"AAAA,UAAU"}"#;
//! let index = MappingIndex::from_payload(payload, DEFAULT_FALLBACK_WIDTH).unwrap();
//!
//! // Column 40 is past every segment start on line 1: the last segment still encloses it
//! let segment = index.enclosing_generated(1, 40).unwrap();
//! assert_eq!(segment.generated_column, 10);
//! ```

pub mod decode;
pub mod error;
pub mod index;
pub mod types;

pub use decode::{DecodedSourceMap, decode};
pub use error::{DecodeError, Result};
pub use index::{DEFAULT_FALLBACK_WIDTH, MappingIndex, OriginalLines};
pub use types::{Mapping, OriginalSpan, RawMapping};
