//! Error types for registry input and batch output.

use std::path::PathBuf;

use thiserror::Error;

/// Problems reading a registry entry file. All are fatal for the batch.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("cannot read registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid JSON entry: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: expected `<id>\\t<tokens>`")]
    MissingTokens { line: usize },

    #[error("line {line}: empty entry id")]
    EmptyId { line: usize },

    #[error("line {line}: duplicate entry id '{id}'")]
    DuplicateId { line: usize, id: String },
}

/// Problems writing reports, summaries or manifests.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
