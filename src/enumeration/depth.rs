//! Inclusive depth window for bounded enumeration

use crate::{Result, TraceGenError};
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range of expansion levels to report
///
/// Depth 1 is the first expansion of the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepthWindow {
    min: usize,
    max: usize,
}

impl DepthWindow {
    /// Build a window from caller-supplied bounds, accepted in either order
    ///
    /// Negative bounds are rejected on the arguments as given, minimum first.
    pub fn new(min_depth: i64, max_depth: i64) -> Result<Self> {
        if min_depth < 0 {
            return Err(TraceGenError::InvalidMinDepth(min_depth));
        }
        if max_depth < 0 {
            return Err(TraceGenError::InvalidMaxDepth(max_depth));
        }

        let (min, max) = if min_depth <= max_depth {
            (min_depth, max_depth)
        } else {
            (max_depth, min_depth)
        };

        Ok(DepthWindow {
            min: min as usize,
            max: max as usize,
        })
    }

    /// Window containing exactly one level
    pub fn exactly(depth: usize) -> Self {
        DepthWindow {
            min: depth,
            max: depth,
        }
    }

    /// Lower bound
    pub fn min(&self) -> usize {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> usize {
        self.max
    }

    /// Check if a level is reported
    pub fn contains(&self, depth: usize) -> bool {
        depth >= self.min && depth <= self.max
    }

    /// Check if expanding below `depth` can still reach a reported level
    pub fn allows_descent(&self, depth: usize) -> bool {
        depth < self.max
    }
}
