//! Data model for extracted comment metadata. Serializes with the field
//! names templates see (`tags`, `ctx`, `isPrivate`, ...).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One input file and the key its metadata is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceUnit {
    pub path: PathBuf,
    #[serde(default)]
    pub tag: Option<String>,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tag: None,
        }
    }

    pub fn tagged(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag: Some(tag.into()),
        }
    }

    /// Explicit tag if present, else the zero-based position as a string.
    pub fn key(&self, position: usize) -> String {
        match self.tag {
            Some(ref tag) => tag.clone(),
            None => position.to_string(),
        }
    }
}

/// A template file and the tag it is registered under (`class`, `index`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateSource {
    pub tag: String,
    pub path: PathBuf,
}

/// One parsed documentation comment plus the code that follows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocBlock {
    /// Annotations in the order they were written.
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub description: Description,
    #[serde(rename = "isPrivate", default)]
    pub is_private: bool,
    /// Set for `/*!` comments.
    #[serde(default)]
    pub ignore: bool,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub ctx: Option<CodeContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub full: String,
    pub summary: String,
    pub body: String,
}

/// A single `@type string` annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "type")]
    pub kind: String,
    /// Rest of the line for tag types without a dedicated layout.
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub local: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

impl Tag {
    pub fn new(kind: impl Into<String>, string: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            string: Some(string.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Function,
    Method,
    Property,
    Declaration,
}

/// What the first line of a block's code declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    #[serde(rename = "type")]
    pub kind: ContextKind,
    pub name: String,
    /// Display form, e.g. `Collection.prototype.find()`.
    pub string: String,
    #[serde(default)]
    pub constructor: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// True if any tag in the list is `@class`.
pub fn tags_mark_class(tags: &[Tag]) -> bool {
    tags.iter().any(|t| t.kind == "class")
}

impl DocBlock {
    pub fn has_tag(&self, kind: &str) -> bool {
        self.tags.iter().any(|t| t.kind == kind)
    }

    pub fn is_class(&self) -> bool {
        tags_mark_class(&self.tags)
    }

    /// A method declaration not marked `@api private`.
    pub fn is_public_method(&self) -> bool {
        !self.is_private
            && self
                .ctx
                .as_ref()
                .is_some_and(|ctx| ctx.kind == ContextKind::Method)
    }

    pub fn is_property(&self) -> bool {
        self.has_tag("property")
    }

    pub fn is_class_constant(&self) -> bool {
        self.has_tag("classconstant")
    }
}

/// Unit key → blocks in source order. Re-inserting a key keeps its
/// original position.
pub type MetadataIndex = IndexMap<String, Vec<DocBlock>>;

/// Function name → examples, for one class.
pub type FunctionExamples = IndexMap<String, Vec<DocBlock>>;

/// Class name → function name → examples, in discovery order.
pub type ExampleIndex = IndexMap<String, FunctionExamples>;

/// Template tag → template source text.
pub type TemplateSet = IndexMap<String, String>;
