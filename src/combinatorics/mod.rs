//! Combinatorial primitives used by the enumerator

mod combinations;

pub use combinations::{binomial, combinations, for_each_combination, subset_count};
