//! Convert directed graphs to and from `petgraph` representations

use super::DirectedGraph;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Configuration for graph export
#[derive(Clone, Debug)]
pub struct ConversionConfig {
    /// Keep vertices that have no incident edges
    pub isolated_vertices: bool,
    /// Render edge labels in DOT output
    pub edge_labels: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            isolated_vertices: true,
            edge_labels: true,
        }
    }
}

/// Convert to a `petgraph` directed graph using the default configuration
pub fn to_petgraph<V, L>(graph: &DirectedGraph<V, L>) -> DiGraph<V, L>
where
    V: Clone + Eq + Hash,
    L: Clone,
{
    to_petgraph_with_config(graph, &ConversionConfig::default())
}

/// Convert to a `petgraph` directed graph
///
/// Node indices follow the vertex insertion order of `graph`.
pub fn to_petgraph_with_config<V, L>(
    graph: &DirectedGraph<V, L>,
    config: &ConversionConfig,
) -> DiGraph<V, L>
where
    V: Clone + Eq + Hash,
    L: Clone,
{
    let mut result = DiGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    let mut index: HashMap<&V, NodeIndex> = HashMap::new();

    let has_incoming: std::collections::HashSet<&V> =
        graph.edges().map(|(_, to, _)| to).collect();

    for vertex in graph.vertices() {
        let isolated = graph.out_degree(vertex) == 0 && !has_incoming.contains(vertex);
        if isolated && !config.isolated_vertices {
            continue;
        }
        index.insert(vertex, result.add_node(vertex.clone()));
    }

    for (from, to, label) in graph.edges() {
        // Both endpoints carry an edge, so neither was filtered out
        if let (Some(&a), Some(&b)) = (index.get(from), index.get(to)) {
            result.add_edge(a, b, label.clone());
        }
    }

    result
}

/// Rebuild a `DirectedGraph` from a `petgraph` directed graph
///
/// Parallel edges collapse onto one pair; the last one wins.
pub fn from_petgraph<V, L>(graph: &DiGraph<V, L>) -> DirectedGraph<V, L>
where
    V: Clone + Eq + Hash,
    L: Clone,
{
    let mut result = DirectedGraph::new();

    for node in graph.node_indices() {
        result.add_vertex(graph[node].clone());
    }

    for edge in graph.raw_edges() {
        result.add_edge(
            graph[edge.source()].clone(),
            graph[edge.target()].clone(),
            edge.weight.clone(),
        );
    }

    result
}

/// Render as Graphviz DOT text using the default configuration
pub fn to_dot<V, L>(graph: &DirectedGraph<V, L>) -> String
where
    V: Clone + Eq + Hash + fmt::Display,
    L: Clone + fmt::Display,
{
    to_dot_with_config(graph, &ConversionConfig::default())
}

/// Render as Graphviz DOT text
pub fn to_dot_with_config<V, L>(graph: &DirectedGraph<V, L>, config: &ConversionConfig) -> String
where
    V: Clone + Eq + Hash + fmt::Display,
    L: Clone + fmt::Display,
{
    let exported = to_petgraph_with_config(graph, config);

    if config.edge_labels {
        format!("{}", Dot::with_config(&exported, &[]))
    } else {
        format!("{}", Dot::with_config(&exported, &[Config::EdgeNoLabel]))
    }
}
