//! Error type shared by extraction, indexing and rendering.

use crate::parser::ParseError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ParseError,
    },
    #[error("missing template: {0}")]
    MissingTemplate(String),
    #[error("failed to load templates: {0}")]
    TemplateLoad(#[source] tera::Error),
    #[error("render error for '{template}': {source}")]
    Render {
        template: String,
        source: tera::Error,
    },
    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, DocError>;

impl DocError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocError::Io {
            path: path.into(),
            source,
        }
    }
}
