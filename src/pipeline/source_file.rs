//! Per-file state carried through the phases

use super::PhaseKind;
use crate::enumeration::TraceSet;
use crate::graph::DirectedGraph;
use crate::Result;
use indexmap::IndexSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Input file, its parsed graph and the traces generated from it
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: PathBuf,
    output_extension: String,
    graph: Option<DirectedGraph<String, String>>,
    traces: TraceSet,
    completed: IndexSet<PhaseKind>,
}

impl SourceFile {
    /// Track `path`, writing traces next to it with the given extension
    pub fn new(path: impl Into<PathBuf>, output_extension: impl Into<String>) -> Self {
        SourceFile {
            path: path.into(),
            output_extension: output_extension.into(),
            graph: None,
            traces: TraceSet::new(),
            completed: IndexSet::new(),
        }
    }

    /// Input path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<input path>.<output extension>`
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(&self.output_extension);
        PathBuf::from(name)
    }

    /// Parsed graph, if the parse phase succeeded and generation has not released it
    pub fn graph(&self) -> Option<&DirectedGraph<String, String>> {
        self.graph.as_ref()
    }

    /// Store the parsed graph
    pub fn set_graph(&mut self, graph: DirectedGraph<String, String>) {
        self.graph = Some(graph);
    }

    /// Release the graph
    pub fn clear_graph(&mut self) {
        self.graph = None;
    }

    /// Record a joined trace; returns true if it was new
    pub fn add_trace(&mut self, trace: &str) -> bool {
        self.traces.insert(trace)
    }

    /// Distinct traces in order of first appearance
    pub fn traces(&self) -> &TraceSet {
        &self.traces
    }

    /// Mark a phase as done
    pub fn mark_completed(&mut self, phase: PhaseKind) {
        self.completed.insert(phase);
    }

    /// Check if a phase is done
    pub fn is_completed(&self, phase: PhaseKind) -> bool {
        self.completed.contains(&phase)
    }

    /// Completed phases in completion order
    pub fn completed_phases(&self) -> impl Iterator<Item = PhaseKind> + '_ {
        self.completed.iter().copied()
    }

    /// Most recently completed phase
    pub fn last_phase(&self) -> Option<PhaseKind> {
        self.completed.last().copied()
    }

    /// Write the traces, one per line, to [`SourceFile::output_path`]
    pub fn write(&self) -> Result<PathBuf> {
        let output = self.output_path();
        let file = File::create(&output)?;
        self.traces.write_to(BufWriter::new(file))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_extension() {
        let file = SourceFile::new("graphs/login.dot", "traces");
        assert_eq!(file.output_path(), PathBuf::from("graphs/login.dot.traces"));
    }

    #[test]
    fn test_add_trace_deduplicates() {
        let mut file = SourceFile::new("a.dot", "traces");
        assert!(file.add_trace("x z"));
        assert!(file.add_trace("y"));
        assert!(!file.add_trace("x z"));
        assert_eq!(file.traces().iter().collect::<Vec<_>>(), vec!["x z", "y"]);
    }

    #[test]
    fn test_phase_bookkeeping() {
        let mut file = SourceFile::new("a.dot", "traces");
        assert_eq!(file.last_phase(), None);

        file.mark_completed(PhaseKind::ParseFile);
        file.mark_completed(PhaseKind::GenerateCombinations);

        assert!(file.is_completed(PhaseKind::ParseFile));
        assert_eq!(file.last_phase(), Some(PhaseKind::GenerateCombinations));
        assert_eq!(file.completed_phases().count(), 2);
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = SourceFile::new(dir.path().join("g.dot"), "traces");
        file.add_trace("a b");
        file.add_trace("c");

        let output = file.write().unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "a b\nc\n");
    }
}
