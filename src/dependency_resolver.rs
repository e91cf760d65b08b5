//! Dependency ordering for a batch of Avro schema files.
//!
//! Data flows parser → graph builder → sorter:
//!
//! - [`definition`] reads one `.avsc` file into a [`SchemaDefinition`]
//! - [`graph`] links definitions that reference each other
//! - [`sort`] orders them so every type is defined before it is used
pub mod definition;
pub mod graph;
pub mod sort;

pub use definition::SchemaDefinition;
pub use graph::{DependencyGraph, Edge, UnresolvedReference};
pub use sort::{sort_definitions, topological_order};

use crate::error::Result;

/// Build the dependency graph for `definitions` and return them in merge order.
///
/// With `strict` set, references to types that no definition provides are an
/// error instead of being treated as externally defined.
pub fn resolve(definitions: Vec<SchemaDefinition>, strict: bool) -> Result<Vec<SchemaDefinition>> {
    let graph = DependencyGraph::build(definitions)?;
    if strict {
        graph.ensure_resolved()?;
    }
    sort_definitions(graph)
}
