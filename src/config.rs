//! Renderer configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "scheduler": { "slice_budget_ms": 8 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub scheduler: SchedulerConfig,
    /// Keep the last committed tree around as the current tree.
    /// Nothing reads it for diffing yet.
    pub retain_committed_tree: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            retain_committed_tree: true,
        }
    }
}

/// Work loop and host timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Yield once less than this is left in a slice.
    pub yield_threshold_ms: u64,
    /// Length of a slice granted by the idle host.
    pub slice_budget_ms: u64,
    /// How long the idle host sleeps when nothing is pending.
    pub idle_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            yield_threshold_ms: 1,
            slice_budget_ms: 16,
            idle_interval_ms: 16,
        }
    }
}

impl SchedulerConfig {
    pub fn yield_threshold(&self) -> Duration {
        Duration::from_millis(self.yield_threshold_ms)
    }

    pub fn slice_budget(&self) -> Duration {
        Duration::from_millis(self.slice_budget_ms)
    }

    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }
}

impl RendererConfig {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
