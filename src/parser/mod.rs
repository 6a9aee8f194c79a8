//! Graph description parsing

mod dot;

pub use dot::{parse_dot, parse_dot_document, DotGraph, DotParser};
