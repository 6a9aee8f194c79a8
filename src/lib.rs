//! # tracegen: exhaustive trace generation from state graphs
//!
//! This library turns a hand-authored state/transition graph into the full set of
//! rooted "combination trees" reachable from every vertex, and flattens those trees
//! into label traces suitable for driving generated tests.
//!
//! ## Features
//!
//! - **Combinatorics**: Lexicographic k-subset enumeration
//! - **Graphs**: Insertion-ordered directed graph with labelled edges
//! - **Enumeration**: Cycle-safe recursive search with optional depth window
//! - **Parsing**: DOT edge-statement front end
//! - **Pipeline**: Parse and generate phases writing `.traces` files

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Combinatorial primitives
pub mod combinatorics;

/// Directed graph container and conversions
pub mod graph;

/// Tree-combination and trace enumeration
pub mod enumeration;

/// DOT front end
pub mod parser;

/// Phase pipeline over source files
pub mod pipeline;

/// Generator configuration
pub mod core;

/// Utility functions and helpers
pub mod utils;

// Re-export commonly used types
pub use self::core::GeneratorConfig;
pub use combinatorics::{combinations, for_each_combination};
pub use enumeration::{
    enumerate, enumerate_from, DepthWindow, Emission, OutputMode, TraceSet, TreeCombinations,
};
pub use graph::DirectedGraph;
pub use parser::parse_dot;
pub use pipeline::{SourceFile, TracesGenerator};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum TraceGenError {
    /// Negative minimum depth passed to a windowed enumeration
    #[error("Invalid minimum depth: {0}")]
    InvalidMinDepth(i64),

    /// Negative maximum depth passed to a windowed enumeration
    #[error("Invalid maximum depth: {0}")]
    InvalidMaxDepth(i64),

    /// Malformed graph description
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        /// 1-based line of the offending token
        line: usize,
        /// 1-based column of the offending token
        column: usize,
        /// What the parser expected
        message: String,
    },

    /// Invalid generator configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation requested before the file was parsed
    #[error("No parsed graph for {0}")]
    MissingGraph(std::path::PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, TraceGenError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        combinatorics::{combinations, for_each_combination},
        core::GeneratorConfig,
        enumeration::{
            enumerate, enumerate_from, DepthWindow, Emission, OutputMode, TraceSet,
            TreeCombinations,
        },
        graph::{to_dot, to_petgraph, DirectedGraph},
        parser::parse_dot,
        pipeline::{SourceFile, TracesGenerator},
        Result, TraceGenError,
    };
}
