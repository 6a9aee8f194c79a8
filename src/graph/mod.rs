//! Directed graph container and its conversions

mod conversion;
mod directed;

pub use conversion::{
    from_petgraph, to_dot, to_dot_with_config, to_petgraph, to_petgraph_with_config,
    ConversionConfig,
};
pub use directed::DirectedGraph;
