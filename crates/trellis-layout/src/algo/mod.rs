pub mod force_atlas2;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// ForceAtlas2-style spring embedder with velocity damping.
    ForceDirected(ForceDirectedOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::ForceDirected(ForceDirectedOptions::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceDirectedOptions {
    /// Fixed number of simulation steps. There is no convergence check.
    pub iterations: usize,
    /// Repulsion scales with `scaling_ratio^2 / distance`, attraction with
    /// `distance / scaling_ratio`.
    pub scaling_ratio: f64,
    /// Velocity multiplier applied after every step, in `[0, 1]`.
    pub damping: f64,
    /// Distances are floored at this value.
    pub epsilon: f64,
    /// Per-step speed limit for a single vertex.
    pub max_displacement: f64,
    /// How strongly edge weight weakens attraction (`0` ignores weights).
    pub edge_weight_influence: f64,
    /// Logarithmic attraction (`ln(1 + distance)`) instead of linear.
    pub lin_log_mode: bool,
    /// Side of the square jitter box used for vertices without a usable position.
    pub jitter_span: f64,
    /// Seed for the jitter box and for separating coincident vertices.
    pub random_seed: u64,
}

impl Default for ForceDirectedOptions {
    fn default() -> Self {
        Self {
            iterations: 100,
            scaling_ratio: 2.0,
            damping: 0.9,
            epsilon: 0.01,
            max_displacement: 50.0,
            edge_weight_influence: 1.0,
            lin_log_mode: false,
            jitter_span: 100.0,
            random_seed: 0,
        }
    }
}

impl ForceDirectedOptions {
    pub fn validate(&self) -> Result<()> {
        fn positive(field: &'static str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidOption {
                    field,
                    message: format!("expected a positive finite number, got {v}"),
                })
            }
        }

        positive("scalingRatio", self.scaling_ratio)?;
        positive("epsilon", self.epsilon)?;
        positive("maxDisplacement", self.max_displacement)?;
        positive("jitterSpan", self.jitter_span)?;
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidOption {
                field: "damping",
                message: format!("expected a value in [0, 1], got {}", self.damping),
            });
        }
        if !(self.edge_weight_influence.is_finite() && self.edge_weight_influence >= 0.0) {
            return Err(Error::InvalidOption {
                field: "edgeWeightInfluence",
                message: format!(
                    "expected a non-negative finite number, got {}",
                    self.edge_weight_influence
                ),
            });
        }
        Ok(())
    }
}
