//! Error types for resolving, merging and converting schema files.
//!
//! Every error is fatal to a run: there is no partial-success mode.

use std::path::PathBuf;

use thiserror::Error;

use crate::dependency_resolver::graph::{Edge, UnresolvedReference};

/// Errors that can occur while producing the combined schema document.
#[derive(Debug, Error)]
pub enum Error {
    /// A schema file is not valid JSON or lacks a usable name.
    #[error("cannot parse schema {}: {message}", .path.display())]
    SchemaParse { path: PathBuf, message: String },

    /// The dependency graph contains at least one cycle.
    #[error("cyclic dependency between schemas: {}", join_edges(.edges))]
    CyclicDependency { edges: Vec<Edge> },

    /// Two files declare the same full name.
    #[error(
        "schema {name} is defined in both {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateDefinition {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Strict mode only: references to types no input file defines.
    #[error("unresolved type references: {}", join_unresolved(.references))]
    UnresolvedReferences { references: Vec<UnresolvedReference> },

    /// Reading an input or writing an output failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file-matching pattern is not a valid glob.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The file-matching pattern selected no schema files.
    #[error("no schema files match {pattern}")]
    NoSchemaFiles { pattern: String },

    /// The dialect converter rejected the combined document.
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while converting Avro to JSON Schema.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("combined document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("named type {0} is defined more than once")]
    Redefined(String),

    #[error("invalid type expression: {0}")]
    InvalidType(String),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

fn join_edges(edges: &[Edge]) -> String {
    edges
        .iter()
        .map(Edge::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_unresolved(references: &[UnresolvedReference]) -> String {
    references
        .iter()
        .map(UnresolvedReference::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
