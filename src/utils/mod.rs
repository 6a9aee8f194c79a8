//! Utility functions for tracegen

use crate::graph::DirectedGraph;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Save object to JSON file
pub fn save_json<T: Serialize>(obj: &T, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(obj)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Load object from JSON file
pub fn load_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let obj = serde_json::from_str(&contents)?;
    Ok(obj)
}

/// Generate a random labelled graph on `vertices` vertices
///
/// Each ordered pair (self-loops included) becomes an edge with probability
/// `edge_probability`. Vertex `i` is named `s{i}` and the edge `i -> j` is labelled `t{i}_{j}`.
/// The same `seed` always produces the same graph.
pub fn random_graph(vertices: usize, edge_probability: f64, seed: u64) -> DirectedGraph<String, String> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let p = edge_probability.clamp(0.0, 1.0);
    let mut graph = DirectedGraph::new();

    for v in 0..vertices {
        graph.add_vertex(format!("s{}", v));
    }

    for from in 0..vertices {
        for to in 0..vertices {
            if rng.gen_bool(p) {
                graph.add_edge(format!("s{}", from), format!("s{}", to), format!("t{}_{}", from, to));
            }
        }
    }

    graph
}

/// Generate a random graph where every vertex has exactly `out_degree` successors
pub fn random_regular_graph(vertices: usize, out_degree: usize, seed: u64) -> DirectedGraph<String, String> {
    use rand::rngs::StdRng;
    use rand::seq::index::sample;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(seed);
    let degree = out_degree.min(vertices);
    let mut graph = DirectedGraph::new();

    for from in 0..vertices {
        graph.add_vertex(format!("s{}", from));
        for to in sample(&mut rng, vertices, degree).into_iter() {
            graph.add_edge(format!("s{}", from), format!("s{}", to), format!("t{}_{}", from, to));
        }
    }

    graph
}

/// Timing utilities
pub mod timing {
    use std::time::Instant;

    /// Scoped timer that logs its elapsed time when dropped
    pub struct Timer {
        start: Instant,
        name: String,
    }

    impl Timer {
        /// Start new timer
        pub fn new(name: &str) -> Self {
            Timer {
                start: Instant::now(),
                name: name.to_string(),
            }
        }

        /// Get elapsed time in seconds
        pub fn elapsed(&self) -> f32 {
            self.start.elapsed().as_secs_f32()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            tracing::debug!(timer = %self.name, seconds = self.elapsed(), "Timer finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_graph_is_reproducible() {
        let a = random_graph(6, 0.4, 7);
        let b = random_graph(6, 0.4, 7);
        assert_eq!(a, b);
        assert_eq!(a.vertex_count(), 6);
    }

    #[test]
    fn test_random_graph_extremes() {
        let empty = random_graph(4, 0.0, 1);
        assert_eq!(empty.edge_count(), 0);

        let full = random_graph(4, 1.0, 1);
        assert_eq!(full.edge_count(), 16);
        assert_eq!(full.label(&"s1".to_string(), &"s2".to_string()), Some(&"t1_2".to_string()));
    }

    #[test]
    fn test_random_regular_graph() {
        let graph = random_regular_graph(5, 2, 3);
        assert_eq!(graph.vertex_count(), 5);
        for v in graph.vertices() {
            assert_eq!(graph.out_degree(v), 2);
        }
    }

    #[test]
    fn test_json_serialization() {
        let graph = random_graph(3, 0.5, 11);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        save_json(&graph, &path).unwrap();
        let loaded: DirectedGraph<String, String> = load_json(&path).unwrap();

        assert_eq!(graph, loaded);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<DirectedGraph<String, String>> = load_json(dir.path().join("missing.json"));
        assert!(matches!(result, Err(crate::TraceGenError::Io(_))));
    }

    #[test]
    fn test_timer_elapsed() {
        let timer = timing::Timer::new("noop");
        assert!(timer.elapsed() >= 0.0);
    }
}
