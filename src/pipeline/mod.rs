//! Per-file processing pipeline
//!
//! Each input goes through [`ParseFile`] then [`GenerateCombinations`]; progress and
//! failures are reported to a [`PhaseListener`].

mod generator;
mod listener;
mod phase;
mod source_file;

pub use generator::{RunSummary, TracesGenerator};
pub use listener::{LoggingListener, MessageLevel, MessageLog, PhaseListener, PhaseMessage};
pub use phase::{next_phase_for, GenerateCombinations, ParseFile, Phase, PhaseKind};
pub use source_file::SourceFile;
