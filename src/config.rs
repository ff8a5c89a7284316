//! Run configuration: JSON manifest plus command-line argument parsing.
//!
//! ```json
//! {
//!   "output": "docs/api",
//!   "extension": "rst",
//!   "templates": [{ "tag": "class", "path": "templates/class.tera" }],
//!   "sources": [{ "path": "lib/db.js", "tag": "db" }],
//!   "examples": [{ "path": "test/db_test.js" }],
//!   "attributes": { "index_title": "Driver API" }
//! }
//! ```

use crate::error::{DocError, Result};
use crate::model::{SourceUnit, TemplateSource};
use crate::render::{Attributes, OutputOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "rst";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub templates: Vec<TemplateSource>,
    #[serde(default)]
    pub sources: Vec<SourceUnit>,
    #[serde(default)]
    pub examples: Vec<SourceUnit>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Manifest {
    /// Load a manifest; relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DocError::io(path, e))?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|e| DocError::Manifest {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(manifest.resolve(base))
    }

    fn resolve(mut self, base: &Path) -> Self {
        self.output = self.output.map(|p| base.join(p));
        for t in &mut self.templates {
            t.path = base.join(&t.path);
        }
        for unit in self.sources.iter_mut().chain(self.examples.iter_mut()) {
            unit.path = base.join(&unit.path);
        }
        self
    }
}

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Units rendered as class documents.
    pub sources: Vec<SourceUnit>,
    /// Units indexed for examples only. When empty, `sources` are indexed.
    pub examples: Vec<SourceUnit>,
    pub templates: Vec<TemplateSource>,
    pub output: OutputOptions,
    pub attributes: Attributes,
}

/// Split `TAG=PATH` into its parts; a plain `PATH` has no tag.
///
/// A tag never contains a path separator, so `lib/a=b.js` is a path.
pub fn split_tagged(arg: &str) -> (Option<&str>, &str) {
    match arg.split_once('=') {
        Some((tag, path))
            if !tag.is_empty() && !path.is_empty() && !tag.contains(['/', '\\']) =>
        {
            (Some(tag), path)
        }
        _ => (None, arg),
    }
}

/// clap value parser for `--template TAG=PATH`.
pub fn parse_template_arg(arg: &str) -> std::result::Result<TemplateSource, String> {
    match split_tagged(arg) {
        (Some(tag), path) => Ok(TemplateSource {
            tag: tag.to_string(),
            path: PathBuf::from(path),
        }),
        (None, _) => Err(format!("expected TAG=PATH, got '{}'", arg)),
    }
}

/// clap value parser for `--attr KEY=VALUE`. The value may be empty.
pub fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}
