//! Metadata extraction: read each source unit and parse its comments.

use crate::error::{DocError, Result};
use crate::model::{MetadataIndex, SourceUnit};
use crate::parser::CommentParser;
use std::fs;
use tracing::debug;

/// Parse every unit into a `MetadataIndex` keyed by tag (or position).
///
/// Any unreadable file or parse failure aborts the whole extraction.
pub fn extract_metadata<P>(units: &[SourceUnit], parser: &P) -> Result<MetadataIndex>
where
    P: CommentParser + ?Sized,
{
    let mut index = MetadataIndex::new();

    for (position, unit) in units.iter().enumerate() {
        let content =
            fs::read_to_string(&unit.path).map_err(|e| DocError::io(&unit.path, e))?;
        let blocks = parser.parse(&content).map_err(|source| DocError::Parse {
            path: unit.path.clone(),
            source,
        })?;

        let key = unit.key(position);
        debug!(path = %unit.path.display(), key = %key, blocks = blocks.len(), "extracted metadata");
        index.insert(key, blocks);
    }

    Ok(index)
}
