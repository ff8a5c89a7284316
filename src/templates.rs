//! Template source loading.

use crate::error::{DocError, Result};
use crate::model::{TemplateSet, TemplateSource};
use std::fs;
use tracing::debug;

/// Read every template into a set keyed by tag. A repeated tag keeps the
/// last file read.
pub fn read_all_templates(sources: &[TemplateSource]) -> Result<TemplateSet> {
    let mut set = TemplateSet::new();
    for source in sources {
        let text = fs::read_to_string(&source.path).map_err(|e| DocError::io(&source.path, e))?;
        debug!(tag = %source.tag, path = %source.path.display(), "loaded template");
        set.insert(source.tag.clone(), text);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_templates_by_tag() {
        let dir = TempDir::new().unwrap();
        let class = dir.path().join("class.tera");
        let index = dir.path().join("index.tera");
        fs::write(&class, "class body").unwrap();
        fs::write(&index, "index body").unwrap();

        let set = read_all_templates(&[
            TemplateSource { tag: "class".into(), path: class },
            TemplateSource { tag: "index".into(), path: index },
        ])
        .unwrap();

        assert_eq!(set.get("class").map(String::as_str), Some("class body"));
        assert_eq!(set.get("index").map(String::as_str), Some("index body"));
    }

    #[test]
    fn unreadable_template_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_all_templates(&[TemplateSource {
            tag: "class".into(),
            path: dir.path().join("missing.tera"),
        }])
        .unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
        assert!(err.to_string().contains("missing.tera"));
    }
}
