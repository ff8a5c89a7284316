//! Renderer module — Tera templates over the metadata and example indexes.
//!
//! Templates are registered under their tag. Two tags are required:
//! `class` (one document per metadata key) and `index` (one document over
//! all keys).

mod helpers;

use crate::error::{DocError, Result};
use crate::model::{DocBlock, ExampleIndex, FunctionExamples, MetadataIndex, TemplateSet};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::debug;

pub use helpers::apply_format;

pub const CLASS_TEMPLATE: &str = "class";
pub const INDEX_TEMPLATE: &str = "index";
/// File stem of the index document.
pub const INDEX_NAME: &str = "index";
/// Attribute used as the index document's title.
pub const INDEX_TITLE_ATTR: &str = "index_title";

/// Free-form key/value options passed through to every template.
pub type Attributes = BTreeMap<String, String>;

pub struct DocRenderer {
    tera: Tera,
}

impl DocRenderer {
    pub fn new(templates: &TemplateSet) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter())
            .map_err(DocError::TemplateLoad)?;
        helpers::register(&mut tera);
        Ok(Self { tera })
    }

    fn has_template(&self, tag: &str) -> bool {
        self.tera.get_template_names().any(|name| name == tag)
    }

    fn render(&self, tag: &str, context: &Context) -> Result<String> {
        if !self.has_template(tag) {
            return Err(DocError::MissingTemplate(tag.to_string()));
        }
        self.tera.render(tag, context).map_err(|source| DocError::Render {
            template: tag.to_string(),
            source,
        })
    }

    /// Render one class document from its blocks and examples.
    pub fn render_class(
        &self,
        class_name: &str,
        entries: &[DocBlock],
        examples: Option<&FunctionExamples>,
        attributes: &Attributes,
    ) -> Result<String> {
        let empty = FunctionExamples::new();
        let mut context = Context::new();
        context.insert("class_name", class_name);
        context.insert("entries", entries);
        context.insert("examples", examples.unwrap_or(&empty));
        context.insert("attributes", attributes);
        self.render(CLASS_TEMPLATE, &context)
    }

    /// Render the index document over every class key.
    pub fn render_index(&self, class_names: &[&str], attributes: &Attributes) -> Result<String> {
        let title = attributes
            .get(INDEX_TITLE_ATTR)
            .map(String::as_str)
            .unwrap_or_default();
        let mut context = Context::new();
        context.insert("entries", class_names);
        context.insert("title", title);
        context.insert("attributes", attributes);
        self.render(INDEX_TEMPLATE, &context)
    }
}

/// Where and how rendered documents are written.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub extension: String,
}

impl OutputOptions {
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.extension))
    }
}

/// Render a document per metadata key plus the index, writing each to disk
/// as soon as it is rendered. Returns the written paths in order.
pub fn render_all(
    renderer: &DocRenderer,
    output: &OutputOptions,
    metadata: &MetadataIndex,
    examples: &ExampleIndex,
    attributes: &Attributes,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&output.dir).map_err(|e| DocError::io(&output.dir, e))?;

    let mut written = Vec::new();

    for (class_name, entries) in metadata.iter() {
        let content =
            renderer.render_class(class_name, entries, examples.get(class_name), attributes)?;
        let path = output.path_for(class_name);
        write_document(&path, &content)?;
        written.push(path);
    }

    let class_names: Vec<&str> = metadata.keys().map(String::as_str).collect();
    let content = renderer.render_index(&class_names, attributes)?;
    let path = output.path_for(INDEX_NAME);
    write_document(&path, &content)?;
    written.push(path);

    Ok(written)
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| DocError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeContext, ContextKind, Tag};
    use tempfile::TempDir;

    fn templates(class: &str, index: &str) -> TemplateSet {
        let mut set = TemplateSet::new();
        set.insert(CLASS_TEMPLATE.to_string(), class.to_string());
        set.insert(INDEX_TEMPLATE.to_string(), index.to_string());
        set
    }

    fn method(name: &str, private: bool) -> DocBlock {
        DocBlock {
            is_private: private,
            ctx: Some(CodeContext {
                kind: ContextKind::Method,
                name: name.to_string(),
                string: format!("Foo.prototype.{}()", name),
                constructor: Some("Foo".to_string()),
                receiver: None,
                value: None,
            }),
            ..Default::default()
        }
    }

    fn output(dir: &TempDir) -> OutputOptions {
        OutputOptions {
            dir: dir.path().join("out"),
            extension: "rst".to_string(),
        }
    }

    #[test]
    fn class_template_sees_entries_and_predicates() {
        let renderer = DocRenderer::new(&templates(
            "{% for e in entries %}{% if e is public_method %}[{{ e.ctx.name }}]{% endif %}{% if e is property %}<prop>{% endif %}{% endfor %}",
            "",
        ))
        .unwrap();

        let property = DocBlock {
            tags: vec![Tag::new("property", "")],
            ..Default::default()
        };
        let entries = vec![method("find", false), method("_hidden", true), property];
        let out = renderer
            .render_class("Foo", &entries, None, &Attributes::new())
            .unwrap();
        assert_eq!(out, "[find]<prop>");
    }

    #[test]
    fn class_template_sees_examples_by_function() {
        let renderer = DocRenderer::new(&templates(
            "{% for fname, list in examples %}{{ fname }}={{ list | length }};{% endfor %}{% if examples.find %}{{ examples.find[0].code }}{% endif %}",
            "",
        ))
        .unwrap();

        let mut fns = FunctionExamples::new();
        fns.insert(
            "find".to_string(),
            vec![DocBlock {
                code: "db.find()".to_string(),
                ..Default::default()
            }],
        );
        let out = renderer
            .render_class("Foo", &[], Some(&fns), &Attributes::new())
            .unwrap();
        assert_eq!(out, "find=1;db.find()");
    }

    #[test]
    fn absent_examples_render_as_empty_map() {
        let renderer = DocRenderer::new(&templates(
            "{{ class_name }}:{{ examples | length }}",
            "",
        ))
        .unwrap();
        let out = renderer
            .render_class("Foo", &[], None, &Attributes::new())
            .unwrap();
        assert_eq!(out, "Foo:0");
    }

    #[test]
    fn index_receives_title_and_entries() {
        let renderer = DocRenderer::new(&templates(
            "",
            "{{ title }}|{% for e in entries %}{{ e }},{% endfor %}",
        ))
        .unwrap();
        let mut attributes = Attributes::new();
        attributes.insert(INDEX_TITLE_ATTR.to_string(), "Driver API".to_string());

        let out = renderer.render_index(&["db", "collection"], &attributes).unwrap();
        assert_eq!(out, "Driver API|db,collection,");
    }

    #[test]
    fn empty_metadata_still_writes_index() {
        let dir = TempDir::new().unwrap();
        let mut set = TemplateSet::new();
        set.insert(INDEX_TEMPLATE.to_string(), "classes={{ entries | length }}".to_string());
        let renderer = DocRenderer::new(&set).unwrap();
        let out = output(&dir);

        let written = render_all(
            &renderer,
            &out,
            &MetadataIndex::new(),
            &ExampleIndex::new(),
            &Attributes::new(),
        )
        .unwrap();

        assert_eq!(written, vec![out.path_for("index")]);
        let content = fs::read_to_string(out.path_for("index")).unwrap();
        assert_eq!(content, "classes=0");
    }

    #[test]
    fn writes_one_document_per_class() {
        let dir = TempDir::new().unwrap();
        let renderer =
            DocRenderer::new(&templates("{{ class_name }}", "{{ entries | join(sep=\",\") }}"))
                .unwrap();
        let mut metadata = MetadataIndex::new();
        metadata.insert("db".to_string(), vec![]);
        metadata.insert("collection".to_string(), vec![]);
        let out = output(&dir);

        let written = render_all(
            &renderer,
            &out,
            &metadata,
            &ExampleIndex::new(),
            &Attributes::new(),
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(fs::read_to_string(out.path_for("db")).unwrap(), "db");
        assert_eq!(
            fs::read_to_string(out.path_for("index")).unwrap(),
            "db,collection"
        );
    }

    #[test]
    fn missing_class_template_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut set = TemplateSet::new();
        set.insert(INDEX_TEMPLATE.to_string(), "".to_string());
        let renderer = DocRenderer::new(&set).unwrap();
        let mut metadata = MetadataIndex::new();
        metadata.insert("db".to_string(), vec![]);

        let err = render_all(
            &renderer,
            &output(&dir),
            &metadata,
            &ExampleIndex::new(),
            &Attributes::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DocError::MissingTemplate(ref tag) if tag == "class"));
    }

    #[test]
    fn broken_template_fails_to_load() {
        let err = DocRenderer::new(&templates("{% if %}", "")).err().unwrap();
        assert!(matches!(err, DocError::TemplateLoad(_)));
    }
}
