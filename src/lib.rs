//! refdoc — render API reference pages from documentation comments.
//!
//! A run extracts comment metadata from each source file, indexes the
//! blocks tagged `@_class`/`@_function` as examples, and renders one
//! document per source key plus an index through Tera templates.

pub mod config;
pub mod error;
pub mod examples;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod templates;

use std::path::PathBuf;
use tracing::info;

pub use config::RunConfig;
pub use error::{DocError, Result};

/// Summary of a completed run.
#[derive(Debug)]
pub struct Report {
    pub classes: usize,
    pub examples: usize,
    pub written: Vec<PathBuf>,
}

/// Run the whole pipeline. Documents written before a failure stay on disk.
pub fn generate(config: &RunConfig) -> Result<Report> {
    let template_set = templates::read_all_templates(&config.templates)?;
    let renderer = render::DocRenderer::new(&template_set)?;
    let parser = parser::JsDocParser;

    let mut metadata = extract::extract_metadata(&config.sources, &parser)?;
    let example_index = if config.examples.is_empty() {
        examples::build_example_index(&mut metadata)
    } else {
        let mut example_metadata = extract::extract_metadata(&config.examples, &parser)?;
        examples::build_example_index(&mut example_metadata)
    };

    let written = render::render_all(
        &renderer,
        &config.output,
        &metadata,
        &example_index,
        &config.attributes,
    )?;

    let example_count: usize = example_index
        .iter()
        .flat_map(|(_, functions)| functions.iter())
        .map(|(_, blocks)| blocks.len())
        .sum();

    info!(
        classes = metadata.len(),
        examples = example_count,
        files = written.len(),
        output = %config.output.dir.display(),
        "generated documentation"
    );

    Ok(Report {
        classes: metadata.len(),
        examples: example_count,
        written,
    })
}
