//! Deduplicated set of space-joined traces

use super::{enumerate, enumerate_from, DepthWindow, Emission, OutputMode};
use crate::graph::DirectedGraph;
use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};

/// Join trace labels with single spaces
pub fn join_trace<L: Display>(labels: &[L]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct traces in order of first appearance
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSet {
    traces: IndexSet<String>,
}

impl TraceSet {
    /// Create an empty set
    pub fn new() -> Self {
        TraceSet {
            traces: IndexSet::new(),
        }
    }

    /// Enumerate every trace of `graph` and keep the distinct ones
    pub fn generate<V, L>(graph: &DirectedGraph<V, L>, window: Option<DepthWindow>) -> Self
    where
        V: Clone + Eq + Hash,
        L: Clone + Display,
    {
        let mut set = TraceSet::new();
        enumerate(graph, OutputMode::Traces, window, |emission| {
            if let Emission::Trace(trace) = emission {
                set.insert_labels(trace);
            }
        });
        set
    }

    /// Same result as [`TraceSet::generate`], with one rayon task per root
    pub fn generate_parallel<V, L>(graph: &DirectedGraph<V, L>, window: Option<DepthWindow>) -> Self
    where
        V: Clone + Eq + Hash + Sync,
        L: Clone + Display + Sync,
    {
        let roots: Vec<&V> = graph.vertices().collect();

        let per_root: Vec<TraceSet> = roots
            .par_iter()
            .map(|root| {
                let mut set = TraceSet::new();
                enumerate_from(graph, root, OutputMode::Traces, window, |emission| {
                    if let Emission::Trace(trace) = emission {
                        set.insert_labels(trace);
                    }
                });
                set
            })
            .collect();

        // Merging in root order keeps first-appearance order identical to `generate`
        let mut result = TraceSet::new();
        for set in per_root {
            result.merge(set);
        }
        result
    }

    /// Insert a joined trace; returns true if it was new
    pub fn insert(&mut self, trace: impl Into<String>) -> bool {
        self.traces.insert(trace.into())
    }

    /// Join and insert a label sequence; returns true if it was new
    pub fn insert_labels<L: Display>(&mut self, labels: &[L]) -> bool {
        self.insert(join_trace(labels))
    }

    /// Absorb another set, keeping this set's order first
    pub fn merge(&mut self, other: TraceSet) {
        self.traces.extend(other.traces);
    }

    /// Check if a joined trace is present
    pub fn contains(&self, trace: &str) -> bool {
        self.traces.contains(trace)
    }

    /// Number of distinct traces
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Iterate in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.traces.iter().map(String::as_str)
    }

    /// Remove all traces
    pub fn clear(&mut self) {
        self.traces.clear();
    }

    /// Write one trace per line
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for trace in &self.traces {
            writeln!(writer, "{}", trace)?;
        }
        writer.flush()
    }
}

impl FromIterator<String> for TraceSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        TraceSet {
            traces: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TraceSet {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectedGraph<String, String> {
        [
            ("A", "B", "x"),
            ("A", "C", "y"),
            ("B", "C", "z"),
            ("C", "A", "w"),
        ]
        .iter()
        .map(|(f, t, l)| (f.to_string(), t.to_string(), l.to_string()))
        .collect()
    }

    #[test]
    fn test_join_trace() {
        assert_eq!(join_trace(&["a", "b", "c"]), "a b c");
        assert_eq!(join_trace::<&str>(&[]), "");
    }

    #[test]
    fn test_generate_deduplicates() {
        let set = TraceSet::generate(&sample(), None);
        let all = crate::enumeration::collect_traces(&sample(), None);

        assert!(set.len() < all.len());
        assert!(set.contains("x z"));
        assert!(set.contains("z w"));
        // C -> A would re-enter the root
        assert!(!set.contains("y w"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = sample();
        let window = Some(DepthWindow::new(1, 2).unwrap());

        let sequential = TraceSet::generate(&graph, window);
        let parallel = TraceSet::generate_parallel(&graph, window);

        assert_eq!(
            sequential.iter().collect::<Vec<_>>(),
            parallel.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_write_to() {
        let mut set = TraceSet::new();
        assert!(set.insert("a b"));
        assert!(!set.insert("a b"));
        assert!(set.insert_labels(&["c"]));

        let mut out = Vec::new();
        set.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a b\nc\n");
    }
}
