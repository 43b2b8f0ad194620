//! Error types for the generator.
//!
//! Only reading the input (and loading an explicit config) is a hard failure.
//! Scanning and extraction degrade to "no record" instead of erroring.

use std::path::PathBuf;

/// Errors produced while loading, generating or writing metadata.
#[derive(Debug, thiserror::Error)]
pub enum FrostError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, FrostError>;
