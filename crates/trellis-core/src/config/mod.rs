use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_layout::ForceDirectedOptions;

use crate::error::{Error, Result};

/// Session-wide settings. Every field has a default, so partial documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub layout: ForceDirectedOptions,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Longest axis, in screen units, that a freshly generated graph is fitted into.
    pub display_budget: f64,
    /// Hit-test radius for [`Session::vertex_at`](crate::Session::vertex_at), in logical units.
    pub hit_radius: f64,
    /// Maximum number of undo snapshots kept. `None` keeps all of them.
    pub history_limit: Option<usize>,
    /// Seed for generators. `None` seeds from entropy.
    pub random_seed: Option<u64>,
    pub worker_threads: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: ForceDirectedOptions::default(),
            zoom_min: 0.01,
            zoom_max: 3.0,
            display_budget: 800.0,
            hit_radius: 20.0,
            history_limit: None,
            random_seed: None,
            worker_threads: 2,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfig { message });

        if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) {
            return invalid(format!("zoomMin must be positive, got {}", self.zoom_min));
        }
        if !(self.zoom_max.is_finite() && self.zoom_max >= self.zoom_min) {
            return invalid(format!(
                "zoomMax must be at least zoomMin ({}), got {}",
                self.zoom_min, self.zoom_max
            ));
        }
        if !(self.display_budget.is_finite() && self.display_budget > 0.0) {
            return invalid(format!(
                "displayBudget must be positive, got {}",
                self.display_budget
            ));
        }
        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return invalid(format!(
                "hitRadius must be non-negative, got {}",
                self.hit_radius
            ));
        }
        if self.history_limit == Some(0) {
            return invalid("historyLimit must be at least 1".to_string());
        }
        if self.worker_threads == 0 {
            return invalid("workerThreads must be at least 1".to_string());
        }
        self.layout.validate()?;
        Ok(())
    }
}
