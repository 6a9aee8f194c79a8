//! Processing phases applied to each source file

use super::{PhaseListener, SourceFile};
use crate::core::GeneratorConfig;
use crate::enumeration::TraceSet;
use crate::parser::parse_dot;
use crate::{Result, TraceGenError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a phase, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Read and parse the graph description
    ParseFile,
    /// Enumerate traces and write the output file
    GenerateCombinations,
}

impl PhaseKind {
    /// Every phase, in execution order
    pub const ALL: [PhaseKind; 2] = [PhaseKind::ParseFile, PhaseKind::GenerateCombinations];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            PhaseKind::ParseFile => "parse",
            PhaseKind::GenerateCombinations => "generate",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First phase not yet completed on `file`
pub fn next_phase_for(file: &SourceFile) -> Option<PhaseKind> {
    PhaseKind::ALL
        .iter()
        .copied()
        .find(|&phase| !file.is_completed(phase))
}

/// One step of per-file processing
///
/// An `Err` means the file cannot continue to later phases; recoverable problems are
/// reported to the listener instead.
pub trait Phase {
    /// Which phase this is
    fn kind(&self) -> PhaseKind;

    /// Run the phase on one file
    fn execute(&self, file: &mut SourceFile, listener: &mut dyn PhaseListener) -> Result<()>;
}

/// Parse the file's DOT text into its graph
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseFile;

impl Phase for ParseFile {
    fn kind(&self) -> PhaseKind {
        PhaseKind::ParseFile
    }

    fn execute(&self, file: &mut SourceFile, listener: &mut dyn PhaseListener) -> Result<()> {
        let text = std::fs::read_to_string(file.path())?;
        let graph = parse_dot(&text)?;

        listener.info(
            file.path(),
            format!(
                "Parsed {} vertices and {} edges",
                graph.vertex_count(),
                graph.edge_count()
            ),
        );
        if graph.is_empty() {
            listener.warning(file.path(), "Graph has no edges".to_string());
        }

        file.set_graph(graph);
        Ok(())
    }
}

/// Enumerate the distinct traces of the parsed graph and write them out
#[derive(Clone, Debug, Default)]
pub struct GenerateCombinations {
    config: GeneratorConfig,
}

impl GenerateCombinations {
    /// Phase using the window and reporting options of `config`
    pub fn new(config: GeneratorConfig) -> Self {
        GenerateCombinations { config }
    }
}

impl Phase for GenerateCombinations {
    fn kind(&self) -> PhaseKind {
        PhaseKind::GenerateCombinations
    }

    fn execute(&self, file: &mut SourceFile, listener: &mut dyn PhaseListener) -> Result<()> {
        let Some(graph) = file.graph() else {
            return Err(TraceGenError::MissingGraph(file.path().to_path_buf()));
        };

        let traces = match self.config.depth_window() {
            Ok(window) => {
                tracing::debug!(path = %file.path().display(), ?window, "Generating traces");
                if self.config.parallel {
                    TraceSet::generate_parallel(graph, window)
                } else {
                    TraceSet::generate(graph, window)
                }
            }
            Err(err) => {
                // Bad window: no traces, but the (empty) output is still written
                listener.error(file.path(), err.to_string());
                TraceSet::new()
            }
        };

        for trace in traces.iter() {
            if file.add_trace(trace) && self.config.show_traces {
                listener.info(file.path(), format!("Trace: {}", trace));
            }
        }

        listener.info(
            file.path(),
            format!("Generated {} distinct traces", file.traces().len()),
        );

        let output = file.write()?;
        tracing::debug!(output = %output.display(), "Wrote trace file");

        file.clear_graph();
        Ok(())
    }
}
