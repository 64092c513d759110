//! Plan files: the factor levels of an experiment, loaded at runtime.
//!
//! ```toml
//! seed = 42
//! variants = ["ResNet", "ViT", "MLP"]
//! context1 = ["low_shift", "medium_shift", "high_shift"]
//! context2 = ["low_noise", "medium_noise", "high_noise"]
//! ```
//!
//! Files ending in `.json` are parsed as JSON, everything else as TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::scheduler::LatinSquareScheduler;

/// Experiment plan: variants plus the levels of both context factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Variants under comparison (Condition A)
    pub variants: Vec<String>,

    /// Levels of the first context factor (Condition B)
    pub context1: Vec<String>,

    /// Levels of the second context factor (Condition C)
    pub context2: Vec<String>,

    /// Random seed for reproducible permutation (None for the base square)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlanConfig {
    /// Load a plan from a TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_err = |message: String| ScheduleError::Config {
            path: path.to_path_buf(),
            message,
        };

        let text = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;

        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&text).map_err(|e| config_err(e.to_string()))
        } else {
            toml::from_str(&text).map_err(|e| config_err(e.to_string()))
        }
    }

    /// Number of variants, and therefore the square dimension.
    pub fn k(&self) -> usize {
        self.variants.len()
    }

    /// Build the scheduler for this plan.
    pub fn into_scheduler(self) -> Result<LatinSquareScheduler<String, String, String>> {
        LatinSquareScheduler::new(self.variants, self.context1, self.context2, self.seed)
    }
}
