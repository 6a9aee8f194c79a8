//! Generator configuration

use crate::enumeration::DepthWindow;
use crate::{Result, TraceGenError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bound value meaning "no bound"
pub const UNBOUNDED: i64 = -1;

/// Settings for a trace generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Lower bound of the depth window; `-1` is the same as unset
    pub min_depth: Option<i64>,
    /// Upper bound of the depth window; `-1` is the same as unset
    pub max_depth: Option<i64>,
    /// Log every newly discovered trace
    pub show_traces: bool,
    /// Directories scanned when no input is given
    pub include_paths: Vec<PathBuf>,
    /// Input file extension, matched case-insensitively
    pub input_extension: String,
    /// Extension appended to the input path for the output file
    pub output_extension: String,
    /// Collect traces with one task per root
    pub parallel: bool,
}

impl GeneratorConfig {
    /// Restrict generation to the levels `[min, max]`
    pub fn with_window(mut self, min_depth: i64, max_depth: i64) -> Self {
        self.min_depth = Some(min_depth);
        self.max_depth = Some(max_depth);
        self
    }

    /// Replace the include paths
    pub fn with_include_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Depth window, present only when both bounds are set
    pub fn depth_window(&self) -> Result<Option<DepthWindow>> {
        match (bound(self.min_depth), bound(self.max_depth)) {
            (Some(min), Some(max)) => DepthWindow::new(min, max).map(Some),
            _ => Ok(None),
        }
    }

    /// Check bounds and extensions
    pub fn validate(&self) -> Result<()> {
        self.validate_window()?;
        self.validate_extensions()
    }

    /// Reject negative depth bounds, minimum first
    pub fn validate_window(&self) -> Result<()> {
        if let Some(min) = bound(self.min_depth) {
            if min < 0 {
                return Err(TraceGenError::InvalidMinDepth(min));
            }
        }

        if let Some(max) = bound(self.max_depth) {
            if max < 0 {
                return Err(TraceGenError::InvalidMaxDepth(max));
            }
        }

        Ok(())
    }

    /// Reject empty or clashing file extensions
    pub fn validate_extensions(&self) -> Result<()> {
        if self.input_extension.trim().is_empty() {
            return Err(TraceGenError::Config(
                "Input extension must not be empty".to_string(),
            ));
        }

        if self.output_extension.trim().is_empty() {
            return Err(TraceGenError::Config(
                "Output extension must not be empty".to_string(),
            ));
        }

        if self
            .input_extension
            .eq_ignore_ascii_case(&self.output_extension)
        {
            return Err(TraceGenError::Config(
                "Input and output extensions must differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if a path carries the input extension
    pub fn matches_input(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case(&self.input_extension))
    }

    /// Load a configuration from a JSON file
    ///
    /// Depth bounds are not checked here; a bad window is reported per input file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let config: GeneratorConfig = crate::utils::load_json(path)?;
        config.validate_extensions()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::utils::save_json(self, path)
    }
}

fn bound(value: Option<i64>) -> Option<i64> {
    value.filter(|&depth| depth != UNBOUNDED)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            min_depth: None,
            max_depth: None,
            show_traces: false,
            include_paths: vec![PathBuf::from("dot_files"), PathBuf::from(".")],
            input_extension: "dot".to_string(),
            output_extension: "traces".to_string(),
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = GeneratorConfig::default();
        assert!(config.validate().is_ok());

        config.min_depth = Some(-2);
        assert!(matches!(config.validate(), Err(TraceGenError::InvalidMinDepth(-2))));

        config.min_depth = Some(1);
        config.max_depth = Some(-3);
        assert!(matches!(config.validate(), Err(TraceGenError::InvalidMaxDepth(-3))));

        config.max_depth = None;
        config.output_extension = String::new();
        assert!(matches!(config.validate(), Err(TraceGenError::Config(_))));

        config.output_extension = "DOT".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_needs_both_bounds() {
        let mut config = GeneratorConfig::default();
        assert_eq!(config.depth_window().unwrap(), None);

        config.min_depth = Some(2);
        assert_eq!(config.depth_window().unwrap(), None);

        let config = config.with_window(4, 2);
        assert_eq!(config.depth_window().unwrap(), Some(DepthWindow::new(2, 4).unwrap()));
    }

    #[test]
    fn test_minus_one_means_unbounded() {
        let config = GeneratorConfig::default().with_window(UNBOUNDED, 3);
        assert!(config.validate().is_ok());
        assert_eq!(config.depth_window().unwrap(), None);

        let config = GeneratorConfig::default().with_window(2, UNBOUNDED);
        assert!(config.validate().is_ok());
        assert_eq!(config.depth_window().unwrap(), None);

        let config = GeneratorConfig::default().with_window(-2, 3);
        assert!(matches!(config.depth_window(), Err(TraceGenError::InvalidMinDepth(-2))));
    }

    #[test]
    fn test_matches_input_case_insensitive() {
        let config = GeneratorConfig::default();
        assert!(config.matches_input(Path::new("a/b.dot")));
        assert!(config.matches_input(Path::new("B.DoT")));
        assert!(!config.matches_input(Path::new("b.dot.traces")));
        assert!(!config.matches_input(Path::new("dot")));
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = GeneratorConfig::default()
            .with_window(1, 3)
            .with_include_paths(["graphs"]);
        config.save_json(&path).unwrap();

        let loaded = GeneratorConfig::load_json(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.input_extension, "dot");
        assert_eq!(config.include_paths.len(), 2);
    }
}
