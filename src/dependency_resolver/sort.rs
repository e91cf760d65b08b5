use std::collections::{BTreeMap, BTreeSet};

use crate::dependency_resolver::definition::SchemaDefinition;
use crate::dependency_resolver::graph::{DependencyGraph, Edge};
use crate::error::{Error, Result};

/// Order `nodes` so that for every edge `from` comes before `to` (Kahn's algorithm).
///
/// Among nodes that are ready at the same time the lexicographically
/// smallest name is taken first, so the result is reproducible. Every node
/// appears exactly once, including nodes no edge touches.
///
/// Self edges (`from == to`) are ignored. Fails with
/// [`Error::CyclicDependency`] listing the edges left over once no node is
/// ready.
pub fn topological_order<'a, I>(nodes: I, mut edges: BTreeSet<Edge>) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    edges.retain(|edge| edge.from != edge.to);
    let mut in_degree: BTreeMap<String, usize> =
        nodes.into_iter().map(|n| (n.to_string(), 0)).collect();
    for edge in &edges {
        in_degree.entry(edge.from.clone()).or_insert(0);
        *in_degree.entry(edge.to.clone()).or_insert(0) += 1;
    }

    let mut ready: BTreeSet<String> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| name.clone())
        .collect();
    let mut order = Vec::with_capacity(in_degree.len());

    while let Some(node) = ready.pop_first() {
        let outgoing: Vec<Edge> = edges
            .range(Edge::new(node.as_str(), "")..)
            .take_while(|edge| edge.from == node)
            .cloned()
            .collect();
        for edge in outgoing {
            edges.remove(&edge);
            if let Some(degree) = in_degree.get_mut(&edge.to) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(edge.to);
                }
            }
        }
        order.push(node);
    }

    if !edges.is_empty() {
        return Err(Error::CyclicDependency {
            edges: edges.into_iter().collect(),
        });
    }
    Ok(order)
}

/// Consume `graph` and return its definitions in merge order.
pub fn sort_definitions(graph: DependencyGraph) -> Result<Vec<SchemaDefinition>> {
    let (mut nodes, edges) = graph.into_parts();
    let order = topological_order(nodes.keys().map(String::as_str), edges)?;
    Ok(order
        .into_iter()
        .filter_map(|name| nodes.remove(&name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> BTreeSet<Edge> {
        pairs.iter().map(|(from, to)| Edge::new(*from, *to)).collect()
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn respects_every_edge() {
        let graph = edges(&[("c", "a"), ("b", "a"), ("d", "c"), ("d", "b")]);
        let order = topological_order(["a", "b", "c", "d"], graph.clone()).unwrap();
        assert_eq!(order.len(), 4);
        for edge in &graph {
            assert!(position(&order, &edge.from) < position(&order, &edge.to), "{edge}");
        }
    }

    #[test]
    fn breaks_ties_by_name() {
        let order = topological_order(["z", "m", "a"], BTreeSet::new()).unwrap();
        assert_eq!(order, vec!["a", "m", "z"]);

        let order = topological_order(["a", "b", "c", "d"], edges(&[("d", "a")])).unwrap();
        assert_eq!(order, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn is_deterministic() {
        let graph = edges(&[("x", "y"), ("w", "y"), ("y", "z")]);
        let first = topological_order(["z", "y", "x", "w", "v"], graph.clone()).unwrap();
        let second = topological_order(["v", "w", "x", "y", "z"], graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn self_edge_is_not_a_cycle() {
        let order = topological_order(["A", "B"], edges(&[("A", "A"), ("A", "B")])).unwrap();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn detects_two_node_cycle() {
        let err = topological_order(["A", "B"], edges(&[("A", "B"), ("B", "A")])).unwrap_err();
        match err {
            Error::CyclicDependency { edges } => {
                assert_eq!(edges, vec![Edge::new("A", "B"), Edge::new("B", "A")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cycle_report_keeps_only_surviving_edges() {
        let err = topological_order(
            ["A", "B", "C", "Root"],
            edges(&[("Root", "A"), ("A", "B"), ("B", "C"), ("C", "A")]),
        )
        .unwrap_err();
        match err {
            Error::CyclicDependency { edges } => {
                assert_eq!(
                    edges,
                    vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("C", "A")]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
