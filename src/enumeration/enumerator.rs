//! Tree-combination enumeration over a directed graph
//!
//! Every vertex is taken as a root. At each vertex every non-empty subset of its outgoing
//! edges is chosen in turn (smallest subsets first, lexicographic within a size), and the
//! search recurses into each newly chosen neighbor that is not yet on the branch. The same
//! traversal feeds two outputs: the combination subgraph built so far, or the label trace
//! along the current path.

use super::DepthWindow;
use crate::combinatorics::for_each_combination;
use crate::graph::DirectedGraph;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Which output the traversal reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputMode {
    /// One subgraph per combination
    Subgraphs,
    /// One label trace per newly chosen neighbor
    Traces,
}

/// A single reported result
#[derive(Debug)]
pub enum Emission<'a, V, L> {
    /// The combination tree accumulated along the branch, including the current choice
    Subgraph(&'a DirectedGraph<V, L>),
    /// Edge labels from the root to the current frontier
    Trace(&'a [L]),
}

/// Trait for the four enumeration call shapes
pub trait TreeCombinations<V, L> {
    /// Report every combination subgraph, unbounded
    fn tree_combinations<F>(&self, on_combination: F)
    where
        F: FnMut(&DirectedGraph<V, L>);

    /// Report combination subgraphs whose expansion level lies in the window
    fn tree_combinations_within<F>(&self, min_depth: i64, max_depth: i64, on_combination: F) -> Result<()>
    where
        F: FnMut(&DirectedGraph<V, L>);

    /// Report every label trace, unbounded
    fn trace_combinations<F>(&self, on_trace: F)
    where
        F: FnMut(&[L]);

    /// Report label traces whose length lies in the window
    fn trace_combinations_within<F>(&self, min_depth: i64, max_depth: i64, on_trace: F) -> Result<()>
    where
        F: FnMut(&[L]);
}

impl<V, L> TreeCombinations<V, L> for DirectedGraph<V, L>
where
    V: Clone + Eq + Hash,
    L: Clone,
{
    fn tree_combinations<F>(&self, mut on_combination: F)
    where
        F: FnMut(&DirectedGraph<V, L>),
    {
        enumerate(self, OutputMode::Subgraphs, None, |emission| {
            if let Emission::Subgraph(graph) = emission {
                on_combination(graph);
            }
        });
    }

    fn tree_combinations_within<F>(&self, min_depth: i64, max_depth: i64, mut on_combination: F) -> Result<()>
    where
        F: FnMut(&DirectedGraph<V, L>),
    {
        let window = DepthWindow::new(min_depth, max_depth)?;
        enumerate(self, OutputMode::Subgraphs, Some(window), |emission| {
            if let Emission::Subgraph(graph) = emission {
                on_combination(graph);
            }
        });
        Ok(())
    }

    fn trace_combinations<F>(&self, mut on_trace: F)
    where
        F: FnMut(&[L]),
    {
        enumerate(self, OutputMode::Traces, None, |emission| {
            if let Emission::Trace(trace) = emission {
                on_trace(trace);
            }
        });
    }

    fn trace_combinations_within<F>(&self, min_depth: i64, max_depth: i64, mut on_trace: F) -> Result<()>
    where
        F: FnMut(&[L]),
    {
        let window = DepthWindow::new(min_depth, max_depth)?;
        enumerate(self, OutputMode::Traces, Some(window), |emission| {
            if let Emission::Trace(trace) = emission {
                on_trace(trace);
            }
        });
        Ok(())
    }
}

/// Enumerate from every vertex of `graph`, in vertex insertion order
///
/// Returns the number of emissions.
pub fn enumerate<V, L, F>(
    graph: &DirectedGraph<V, L>,
    mode: OutputMode,
    window: Option<DepthWindow>,
    visit: F,
) -> usize
where
    V: Clone + Eq + Hash,
    L: Clone,
    F: FnMut(Emission<'_, V, L>),
{
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        ?mode,
        ?window,
        "enumerating tree combinations"
    );

    let mut search = Search::new(graph, mode, window, visit);
    for root in graph.vertices() {
        search.run_root(root);
    }

    tracing::debug!(emitted = search.emitted, "enumeration finished");
    search.emitted
}

/// Enumerate from a single root; nothing is emitted if `root` is not in the graph
pub fn enumerate_from<V, L, F>(
    graph: &DirectedGraph<V, L>,
    root: &V,
    mode: OutputMode,
    window: Option<DepthWindow>,
    visit: F,
) -> usize
where
    V: Clone + Eq + Hash,
    L: Clone,
    F: FnMut(Emission<'_, V, L>),
{
    if !graph.contains_vertex(root) {
        return 0;
    }

    let mut search = Search::new(graph, mode, window, visit);
    search.run_root(root);
    search.emitted
}

/// Collect every reported subgraph
pub fn collect_subgraphs<V, L>(
    graph: &DirectedGraph<V, L>,
    window: Option<DepthWindow>,
) -> Vec<DirectedGraph<V, L>>
where
    V: Clone + Eq + Hash,
    L: Clone,
{
    let mut result = Vec::new();
    enumerate(graph, OutputMode::Subgraphs, window, |emission| {
        if let Emission::Subgraph(combination) = emission {
            result.push(combination.clone());
        }
    });
    result
}

/// Collect every reported trace
pub fn collect_traces<V, L>(graph: &DirectedGraph<V, L>, window: Option<DepthWindow>) -> Vec<Vec<L>>
where
    V: Clone + Eq + Hash,
    L: Clone,
{
    let mut result = Vec::new();
    enumerate(graph, OutputMode::Traces, window, |emission| {
        if let Emission::Trace(trace) = emission {
            result.push(trace.to_vec());
        }
    });
    result
}

/// Recursive search state shared by one enumeration run
struct Search<'g, V, L, F> {
    graph: &'g DirectedGraph<V, L>,
    mode: OutputMode,
    window: Option<DepthWindow>,
    visit: F,
    /// Label stack of the current path (trace mode only)
    trace: Vec<L>,
    emitted: usize,
}

impl<'g, V, L, F> Search<'g, V, L, F>
where
    V: Clone + Eq + Hash,
    L: Clone,
    F: FnMut(Emission<'_, V, L>),
{
    fn new(graph: &'g DirectedGraph<V, L>, mode: OutputMode, window: Option<DepthWindow>, visit: F) -> Self {
        Search {
            graph,
            mode,
            window,
            visit,
            trace: Vec::new(),
            emitted: 0,
        }
    }

    fn run_root(&mut self, root: &V) {
        let mut visited = HashSet::new();
        visited.insert(root.clone());

        self.expand(root, &visited, None, 1);
        debug_assert!(self.trace.is_empty());
    }

    fn reports(&self, depth: usize) -> bool {
        self.window.map_or(true, |window| window.contains(depth))
    }

    fn descends(&self, depth: usize) -> bool {
        self.window.map_or(true, |window| window.allows_descent(depth))
    }

    /// Expand `vertex` at `depth` with the branch's ancestor set and accumulated tree
    ///
    /// The accumulator is `None` at a root and always `None` in trace mode.
    fn expand(
        &mut self,
        vertex: &V,
        visited: &HashSet<V>,
        accumulator: Option<&DirectedGraph<V, L>>,
        depth: usize,
    ) {
        if self.window.map_or(false, |window| depth > window.max()) {
            return;
        }

        let graph = self.graph;
        let neighbors: Vec<(&'g V, &'g L)> = graph.neighbors(vertex).collect();
        let n = neighbors.len();

        for size in 1..=n {
            // Each subset size starts from the branch's own ancestor set
            let mut claimed = visited.clone();

            for_each_combination(n, size, |indices| {
                self.expand_combination(vertex, &neighbors, indices, &mut claimed, accumulator, depth);
            });
        }
    }

    fn expand_combination(
        &mut self,
        vertex: &V,
        neighbors: &[(&'g V, &'g L)],
        indices: &[usize],
        claimed: &mut HashSet<V>,
        accumulator: Option<&DirectedGraph<V, L>>,
        depth: usize,
    ) {
        match self.mode {
            OutputMode::Subgraphs => {
                let mut combination = accumulator.cloned().unwrap_or_default();
                for &index in indices {
                    let (neighbor, label) = neighbors[index];
                    combination.add_edge(vertex.clone(), neighbor.clone(), label.clone());
                }

                if self.reports(depth) {
                    self.emitted += 1;
                    (self.visit)(Emission::Subgraph(&combination));
                }

                if !self.descends(depth) {
                    return;
                }

                for &index in indices {
                    let child = neighbors[index].0;
                    if claimed.insert(child.clone()) {
                        self.expand(child, claimed, Some(&combination), depth + 1);
                    }
                }
            }
            OutputMode::Traces => {
                for &index in indices {
                    let (child, label) = neighbors[index];
                    if !claimed.insert(child.clone()) {
                        continue;
                    }

                    self.trace.push(label.clone());

                    if self.reports(depth) {
                        self.emitted += 1;
                        (self.visit)(Emission::Trace(&self.trace));
                    }

                    if self.descends(depth) {
                        self.expand(child, claimed, None, depth + 1);
                    }

                    self.trace.pop();
                }
            }
        }
    }
}
