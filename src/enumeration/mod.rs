//! Tree-combination and trace enumeration

mod depth;
mod enumerator;
mod trace_set;

pub use depth::DepthWindow;
pub use enumerator::{
    collect_subgraphs, collect_traces, enumerate, enumerate_from, Emission, OutputMode,
    TreeCombinations,
};
pub use trace_set::{join_trace, TraceSet};
