//! Error types for pipeline document loading.

use std::io;

use thiserror::Error;

/// Errors raised while reading or validating a pipeline document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read pipeline document: {0}")]
    Read(#[from] io::Error),

    #[error("Unsupported document format '{0}' (expected .yaml, .yml, .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document root must be a mapping")]
    NotAMapping,

    #[error("Document mixes English key '{english}' with Portuguese key '{portuguese}'")]
    MixedKeySchemes { english: String, portuguese: String },

    #[error("Invalid pipeline document: {0}")]
    Schema(String),

    #[error("Merge item '{path}': {field} must be a whole number >= 1, got {value}")]
    InvalidPage {
        path: String,
        field: String,
        value: String,
    },

    #[error("Merge item '{path}': first page {first} is after last page {last}")]
    InvalidPageRange { path: String, first: u32, last: u32 },
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
