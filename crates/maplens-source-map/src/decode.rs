//! Decoding of version 3 source map payloads
//!
//! The wire format is handled by the `sourcemap` crate. Regular and indexed
//! maps are both accepted; an indexed map is flattened into one mapping list
//! before its tokens are converted. This module only turns tokens into
//! [`RawMapping`] records with 1-based lines.

use crate::error::{DecodeError, Result};
use crate::types::RawMapping;
use sourcemap::{DecodedMap, SourceMap, Token};
use std::sync::Arc;

/// A decoded payload: the record list plus the tables it refers to.
#[derive(Debug, Clone, Default)]
pub struct DecodedSourceMap {
    /// The `file` field, if present
    pub file: Option<String>,
    /// Source ids with `sourceRoot` applied
    pub sources: Vec<Arc<str>>,
    /// Records in generated order
    pub mappings: Vec<RawMapping>,
}

/// Decode a raw payload into mapping records.
///
/// # Example
///
/// ```
/// use maplens_source_map::decode;
///
/// let map = decode(r#"{"version":3,"sources":["a.js"],"names":[],"mappings":"AAAA,IAAI"}"#).unwrap();
/// assert_eq!(map.mappings.len(), 2);
/// assert_eq!(map.mappings[1].generated_column, 4);
/// assert_eq!(map.mappings[1].original_column, Some(4));
/// ```
pub fn decode(payload: &str) -> Result<DecodedSourceMap> {
    let map = match sourcemap::decode_slice(payload.as_bytes())? {
        DecodedMap::Regular(map) => map,
        DecodedMap::Index(index) => index.flatten()?,
        DecodedMap::Hermes(hermes) => SourceMap::clone(&hermes),
    };
    from_source_map(&map)
}

fn from_source_map(map: &SourceMap) -> Result<DecodedSourceMap> {
    let sources: Vec<Arc<str>> = map
        .sources()
        .filter(|s| !s.is_empty())
        .map(Arc::from)
        .collect();

    let mut mappings = Vec::new();
    for token in map.tokens() {
        mappings.push(to_record(&token, &sources)?);
    }

    Ok(DecodedSourceMap {
        file: map.get_file().map(str::to_string),
        sources,
        mappings,
    })
}

/// Convert one token; sources are shared with the table built above.
fn to_record(token: &Token<'_>, sources: &[Arc<str>]) -> Result<RawMapping> {
    let generated_line = one_based(token.get_dst_line())?;
    let mut record = RawMapping::generated_only(generated_line, token.get_dst_col());

    // A null or empty entry in `sources` leaves the record without an original side.
    if let Some(source) = token.get_source().filter(|s| !s.is_empty()) {
        let source = sources
            .iter()
            .find(|s| s.as_ref() == source)
            .cloned()
            .unwrap_or_else(|| Arc::from(source));
        record.source = Some(source);
        record.original_line = Some(one_based(token.get_src_line())?);
        record.original_column = Some(token.get_src_col());
    }
    record.name = token.get_name().map(Arc::from);

    Ok(record)
}

fn one_based(line: u32) -> Result<u32> {
    line.checked_add(1).ok_or(DecodeError::LineOutOfRange(line))
}
