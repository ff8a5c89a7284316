//! Example indexing: blocks annotated with both `@_class` and `@_function`
//! are grouped by class and function, and their code is reshaped into a
//! display snippet.

use crate::model::{ExampleIndex, MetadataIndex, Tag};
use std::collections::HashMap;
use tracing::debug;

pub const CLASS_TAG: &str = "_class";
pub const FUNCTION_TAG: &str = "_function";

/// Annotation type → annotation string. Later duplicates overwrite earlier
/// ones; tags without a string are skipped.
pub fn fold_tags(tags: &[Tag]) -> HashMap<&str, &str> {
    let mut folded = HashMap::new();
    for tag in tags {
        if let Some(ref string) = tag.string {
            folded.insert(tag.kind.as_str(), string.as_str());
        }
    }
    folded
}

/// Drop the first and last line, then strip one leading two-space indent
/// from each remaining line.
pub fn normalize_code(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    if lines.len() < 3 {
        return String::new();
    }
    lines[1..lines.len() - 1]
        .iter()
        .map(|line| line.strip_prefix("  ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the class → function → examples lookup.
///
/// Each qualifying block has its `code` normalized in place exactly once; the
/// index holds copies taken after normalization.
pub fn build_example_index(metadata: &mut MetadataIndex) -> ExampleIndex {
    let mut index = ExampleIndex::new();

    for (unit, blocks) in metadata.iter_mut() {
        for block in blocks.iter_mut() {
            let (class, function) = {
                let folded = fold_tags(&block.tags);
                match (folded.get(CLASS_TAG), folded.get(FUNCTION_TAG)) {
                    (Some(class), Some(function)) => (class.to_string(), function.to_string()),
                    _ => continue,
                }
            };

            block.code = normalize_code(&block.code);
            debug!(unit = %unit, class = %class, function = %function, "indexed example");

            index
                .entry(class)
                .or_default()
                .entry(function)
                .or_default()
                .push(block.clone());
        }
    }

    index
}
