use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{debug, warn};

use crate::avro::local_name;
use crate::dependency_resolver::definition::SchemaDefinition;
use crate::error::{Error, Result};

/// `from` must be merged before `to`, because `to` references the type `from` defines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A reference that no definition in the batch satisfies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnresolvedReference {
    /// Full name of the referencing definition.
    pub definition: String,
    /// The referenced full name.
    pub reference: String,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (referenced by {})", self.reference, self.definition)
    }
}

/// Definitions keyed by full name together with the edges between them.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, SchemaDefinition>,
    edges: BTreeSet<Edge>,
    unresolved: Vec<UnresolvedReference>,
}

impl DependencyGraph {
    /// Link every definition to the definitions it references.
    ///
    /// References to names outside the batch are recorded as unresolved and
    /// otherwise ignored. Self references never produce an edge.
    pub fn build(definitions: Vec<SchemaDefinition>) -> Result<Self> {
        let mut nodes: BTreeMap<String, SchemaDefinition> = BTreeMap::new();
        for definition in definitions {
            if let Some(existing) = nodes.get(definition.name()) {
                return Err(Error::DuplicateDefinition {
                    name: definition.name().to_string(),
                    first: existing.path().to_path_buf(),
                    second: definition.path().to_path_buf(),
                });
            }
            nodes.insert(definition.name().to_string(), definition);
        }

        let inline: BTreeSet<&str> = nodes
            .values()
            .flat_map(|definition| definition.defined_names())
            .map(String::as_str)
            .collect();

        let mut edges = BTreeSet::new();
        let mut unresolved = Vec::new();
        for (name, definition) in &nodes {
            for reference in definition.dependencies() {
                if reference == name {
                    continue;
                }
                if nodes.contains_key(reference) {
                    edges.insert(Edge::new(reference.as_str(), name.as_str()));
                    continue;
                }
                if inline.contains(reference.as_str()) {
                    continue;
                }

                debug!(definition = %name, reference = %reference, "treating reference as externally defined");
                let local = local_name(reference);
                if let Some(similar) = nodes.keys().find(|known| local_name(known) == local) {
                    warn!(
                        definition = %name,
                        reference = %reference,
                        similar = %similar,
                        "unresolved reference has the same local name as a known schema"
                    );
                }
                unresolved.push(UnresolvedReference {
                    definition: name.clone(),
                    reference: reference.clone(),
                });
            }
        }

        Ok(Self {
            nodes,
            edges,
            unresolved,
        })
    }

    /// Fail with [`Error::UnresolvedReferences`] if any reference stayed unresolved.
    pub fn ensure_resolved(&self) -> Result<()> {
        if self.unresolved.is_empty() {
            Ok(())
        } else {
            Err(Error::UnresolvedReferences {
                references: self.unresolved.clone(),
            })
        }
    }

    pub fn nodes(&self) -> &BTreeMap<String, SchemaDefinition> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, SchemaDefinition>, BTreeSet<Edge>) {
        (self.nodes, self.edges)
    }
}
