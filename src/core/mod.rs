//! Configuration for trace generation runs

mod config;

pub use config::{GeneratorConfig, UNBOUNDED};
