//! Directed graph with labelled edges
//!
//! - Vertices and neighbor maps keep insertion order, so every traversal over the same
//!   graph visits vertices and edges in the same order
//! - At most one edge per ordered pair; re-inserting a pair overwrites its label

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Adjacency map from each vertex to its outgoing neighbors and edge labels
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize + Eq + Hash, L: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash, L: Deserialize<'de>"
))]
pub struct DirectedGraph<V, L = ()> {
    adjacency: IndexMap<V, IndexMap<V, L>>,
}

impl<V, L> DirectedGraph<V, L>
where
    V: Clone + Eq + Hash,
{
    /// Create an empty graph
    pub fn new() -> Self {
        DirectedGraph {
            adjacency: IndexMap::new(),
        }
    }

    /// Build a graph from `(from, to, label)` triples
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V, L)>,
    {
        edges.into_iter().collect()
    }

    /// Add a vertex without edges; returns true if it was not present
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, IndexMap::new());
        true
    }

    /// Insert the edge `from -> to`, creating both endpoints as needed
    ///
    /// Returns true if the pair was already present; its label is overwritten.
    pub fn add_edge(&mut self, from: V, to: V, label: L) -> bool {
        self.adjacency.entry(from.clone()).or_default();
        self.adjacency.entry(to.clone()).or_default();

        self.adjacency
            .entry(from)
            .or_default()
            .insert(to, label)
            .is_some()
    }

    /// Remove every vertex and edge
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexMap::len).sum()
    }

    /// Check if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Check if a vertex is present
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Label of the edge `from -> to`
    pub fn label(&self, from: &V, to: &V) -> Option<&L> {
        self.adjacency.get(from).and_then(|neighbors| neighbors.get(to))
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    /// Outgoing `(neighbor, label)` pairs of a vertex, in insertion order
    pub fn neighbors<'a>(&'a self, vertex: &V) -> impl Iterator<Item = (&'a V, &'a L)> + 'a {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter())
    }

    /// Number of outgoing edges of a vertex (0 when absent)
    pub fn out_degree(&self, vertex: &V) -> usize {
        self.adjacency.get(vertex).map_or(0, IndexMap::len)
    }

    /// All edges as `(from, to, label)`
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, &L)> {
        self.adjacency.iter().flat_map(|(from, neighbors)| {
            neighbors.iter().map(move |(to, label)| (from, to, label))
        })
    }

    /// Label sequences of every root-to-leaf path starting at `root`
    ///
    /// A vertex is never entered twice on the same path, so cyclic graphs terminate;
    /// a path whose next step would close a cycle ends there. A root without
    /// outgoing edges yields no paths.
    pub fn root_to_leaf_label_paths(&self, root: &V) -> Vec<Vec<L>>
    where
        L: Clone,
    {
        let mut paths = Vec::new();
        let mut on_path = vec![root.clone()];
        let mut labels = Vec::new();
        self.dfs_label_paths(root, &mut on_path, &mut labels, &mut paths);
        paths
    }

    fn dfs_label_paths(
        &self,
        vertex: &V,
        on_path: &mut Vec<V>,
        labels: &mut Vec<L>,
        paths: &mut Vec<Vec<L>>,
    ) where
        L: Clone,
    {
        let mut extended = false;

        for (next, label) in self.neighbors(vertex) {
            if on_path.contains(next) {
                continue;
            }
            extended = true;
            on_path.push(next.clone());
            labels.push(label.clone());
            self.dfs_label_paths(next, on_path, labels, paths);
            labels.pop();
            on_path.pop();
        }

        if !extended && !labels.is_empty() {
            paths.push(labels.clone());
        }
    }

    /// Human-readable adjacency listing, one `vertex -> neighbor ...` line per vertex
    pub fn render(&self) -> String
    where
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<V, L> Default for DirectedGraph<V, L>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, L> PartialEq for DirectedGraph<V, L>
where
    V: Eq + Hash,
    L: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl<V, L> Eq for DirectedGraph<V, L>
where
    V: Eq + Hash,
    L: Eq,
{
}

impl<V, L> fmt::Display for DirectedGraph<V, L>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (vertex, neighbors) in &self.adjacency {
            if neighbors.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;

            write!(f, "{} ->", vertex)?;
            for neighbor in neighbors.keys() {
                write!(f, " {}", neighbor)?;
            }
        }

        Ok(())
    }
}

impl<V, L> FromIterator<(V, V, L)> for DirectedGraph<V, L>
where
    V: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (V, V, L)>>(iter: I) -> Self {
        let mut graph = DirectedGraph::new();
        graph.extend(iter);
        graph
    }
}

impl<V, L> Extend<(V, V, L)> for DirectedGraph<V, L>
where
    V: Clone + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (V, V, L)>>(&mut self, iter: I) {
        for (from, to, label) in iter {
            self.add_edge(from, to, label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(edges: &[(&str, &str, &str)]) -> DirectedGraph<String, String> {
        DirectedGraph::from_edges(
            edges
                .iter()
                .map(|(f, t, l)| (f.to_string(), t.to_string(), l.to_string())),
        )
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        assert!(!graph.add_edge("A", "B", ()));

        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.contains_vertex(&"B"));
        assert_eq!(graph.out_degree(&"B"), 0);
        assert_eq!(graph.vertices().copied().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_reinsert_overwrites_label() {
        let mut graph = DirectedGraph::new();
        assert!(!graph.add_edge("A", "B", "x"));
        assert!(graph.add_edge("A", "B", "y"));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.label(&"A", &"B"), Some(&"y"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = labelled(&[("A", "B", "x")]);
        let mut copy = original.clone();
        copy.add_edge("B".into(), "C".into(), "z".into());

        assert_eq!(original.vertex_count(), 2);
        assert_eq!(original.edge_count(), 1);
        assert_eq!(copy.edge_count(), 2);
        assert_ne!(original, copy);
    }

    #[test]
    fn test_clear() {
        let mut graph = labelled(&[("A", "B", "x"), ("B", "C", "y")]);
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_render_skips_leaves() {
        let graph = labelled(&[("A", "B", "x"), ("A", "C", "y"), ("B", "C", "z")]);
        assert_eq!(graph.render(), "A -> B C\nB -> C");

        let empty: DirectedGraph<String, String> = DirectedGraph::new();
        assert_eq!(empty.render(), "");
    }

    #[test]
    fn test_edges_in_insertion_order() {
        let graph = labelled(&[("A", "B", "x"), ("C", "B", "y")]);
        let edges: Vec<_> = graph
            .edges()
            .map(|(f, t, l)| (f.as_str(), t.as_str(), l.as_str()))
            .collect();

        assert_eq!(edges, vec![("A", "B", "x"), ("C", "B", "y")]);
        assert_eq!(graph.vertices().map(String::as_str).collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_root_to_leaf_label_paths() {
        let graph = labelled(&[("A", "B", "x"), ("A", "C", "y"), ("B", "C", "z"), ("C", "A", "w")]);
        let paths = graph.root_to_leaf_label_paths(&"A".to_string());

        assert_eq!(
            paths,
            vec![
                vec!["x".to_string(), "z".to_string()],
                vec!["y".to_string()],
            ]
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let graph = labelled(&[("A", "B", "x"), ("B", "A", "y")]);
        let json = serde_json::to_string(&graph).unwrap();
        let back: DirectedGraph<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(graph, back);
    }
}
