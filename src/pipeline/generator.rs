//! Run driver: resolve inputs and take each file through every phase

use super::{
    next_phase_for, GenerateCombinations, ParseFile, Phase, PhaseKind, PhaseListener, SourceFile,
};
use crate::core::GeneratorConfig;
use crate::utils::timing::Timer;
use crate::Result;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of a run over several files
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files taken through every phase
    pub processed: usize,
    /// Distinct traces summed over all files
    pub traces: usize,
    /// Files that reported at least one error
    pub failed: Vec<PathBuf>,
}

impl RunSummary {
    /// Check if no file failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Error-counting wrapper, so a run can tell which files reported failures
struct Tracking<'a> {
    inner: &'a mut dyn PhaseListener,
    errors: usize,
}

impl PhaseListener for Tracking<'_> {
    fn notify(&mut self, message: super::PhaseMessage) {
        if message.level == super::MessageLevel::Error {
            self.errors += 1;
        }
        self.inner.notify(message);
    }
}

/// Drives trace generation over a set of input files
pub struct TracesGenerator {
    config: GeneratorConfig,
    phases: Vec<Box<dyn Phase + Send + Sync>>,
}

impl TracesGenerator {
    /// Create a generator with the standard parse and generate phases
    pub fn new(config: GeneratorConfig) -> Self {
        let phases: Vec<Box<dyn Phase + Send + Sync>> = vec![
            Box::new(ParseFile),
            Box::new(GenerateCombinations::new(config.clone())),
        ];
        TracesGenerator { config, phases }
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Expand `inputs` into the list of files to process
    ///
    /// Directories contribute their files with the input extension, sorted by name;
    /// plain paths are taken as given. With no inputs the include paths are scanned,
    /// skipping those that do not exist. Duplicates are dropped, first occurrence wins.
    pub fn resolve_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = IndexSet::new();

        if inputs.is_empty() {
            for dir in &self.config.include_paths {
                if dir.is_dir() {
                    files.extend(self.scan_directory(dir)?);
                } else {
                    tracing::debug!(path = %dir.display(), "Skipping missing include path");
                }
            }
        } else {
            for input in inputs {
                if input.is_dir() {
                    files.extend(self.scan_directory(input)?);
                } else {
                    files.insert(input.clone());
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    fn scan_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.config.matches_input(&path) {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }

    /// Take one file through every phase
    ///
    /// A failing phase is reported to the listener and stops this file only.
    pub fn process_file(&self, path: &Path, listener: &mut dyn PhaseListener) -> SourceFile {
        let mut file = SourceFile::new(path, self.config.output_extension.clone());

        while let Some(kind) = next_phase_for(&file) {
            let Some(phase) = self.phase(kind) else {
                break;
            };

            tracing::info!(path = %path.display(), phase = %kind, "Running phase");
            if let Err(err) = phase.execute(&mut file, listener) {
                listener.error(path, format!("{} failed: {}", kind, err));
                break;
            }
            file.mark_completed(kind);
        }

        file
    }

    fn phase(&self, kind: PhaseKind) -> Option<&(dyn Phase + Send + Sync)> {
        self.phases
            .iter()
            .find(|phase| phase.kind() == kind)
            .map(|phase| &**phase)
    }

    /// Process every resolved input
    pub fn run(&self, inputs: &[PathBuf], listener: &mut dyn PhaseListener) -> Result<RunSummary> {
        self.config.validate_extensions()?;

        let _timer = Timer::new("trace generation");
        let files = self.resolve_inputs(inputs)?;
        tracing::info!(count = files.len(), "Resolved input files");

        let mut summary = RunSummary::default();
        let mut tracking = Tracking {
            inner: listener,
            errors: 0,
        };

        for path in &files {
            let before = tracking.errors;
            let file = self.process_file(path, &mut tracking);

            if next_phase_for(&file).is_none() {
                summary.processed += 1;
            }
            summary.traces += file.traces().len();
            if tracking.errors > before {
                summary.failed.push(path.clone());
            }
        }

        tracing::info!(
            processed = summary.processed,
            failed = summary.failed.len(),
            traces = summary.traces,
            "Run finished"
        );
        Ok(summary)
    }
}
