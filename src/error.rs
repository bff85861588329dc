//! Error types for documentation generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Every variant is fatal: the run stops at the first one and nothing is
/// retried.
#[derive(Debug, Error)]
pub enum Error {
    /// A glob pattern could not be compiled.
    #[error("invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A pattern resolved to zero input files.
    #[error("no files matched: {pattern}")]
    NoMatches { pattern: String },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An OpenAPI YAML document failed to parse.
    #[error("invalid OpenAPI document {}", .path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An OpenAPI JSON document failed to parse.
    #[error("invalid OpenAPI document {}", .path.display())]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to create output directory: {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two inputs of the same batch derive the same output path.
    #[error(
        "output collision: {} is produced by both {first} and {second}",
        .path.display()
    )]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
