use crate::error::{EvaluationError, Result};
use serde::{Deserialize, Serialize};

/// Limits the alert rules compare against.
///
/// Built once per evaluation and never mutated by the evaluator. Call
/// [`ThresholdConfig::validate`] (or construct an
/// [`AlertEvaluator`](crate::engine::AlertEvaluator), which does) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Latest traffic strictly below this fires a critical alert.
    #[serde(default = "default_traffic_floor")]
    pub traffic_floor: f64,
    /// Latest CTR (percent) strictly below this fires a warning.
    #[serde(default = "default_ctr_floor")]
    pub ctr_floor: f64,
    /// Latest keyword rank strictly above this fires an info alert.
    #[serde(default = "default_rank_ceiling")]
    pub rank_ceiling: u32,
    /// A traffic change (percent) at or below this fires a critical alert.
    /// `-10.0` means a drop of 10% or more.
    #[serde(default = "default_drop_rate_ceiling")]
    pub drop_rate_ceiling: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            traffic_floor: default_traffic_floor(),
            ctr_floor: default_ctr_floor(),
            rank_ceiling: default_rank_ceiling(),
            drop_rate_ceiling: default_drop_rate_ceiling(),
        }
    }
}

fn default_traffic_floor() -> f64 {
    500.0
}

fn default_ctr_floor() -> f64 {
    2.0
}

fn default_rank_ceiling() -> u32 {
    10
}

fn default_drop_rate_ceiling() -> f64 {
    -10.0
}

impl ThresholdConfig {
    /// Checks every limit against its valid range and reports the first
    /// violation.
    pub fn validate(&self) -> Result<()> {
        if !self.traffic_floor.is_finite() || self.traffic_floor < 0.0 {
            return Err(invalid(
                "traffic_floor",
                self.traffic_floor,
                "must be a finite number >= 0",
            ));
        }
        if !self.ctr_floor.is_finite() || !(0.0..=100.0).contains(&self.ctr_floor) {
            return Err(invalid(
                "ctr_floor",
                self.ctr_floor,
                "must be within [0, 100]",
            ));
        }
        if self.rank_ceiling < 1 {
            return Err(invalid(
                "rank_ceiling",
                f64::from(self.rank_ceiling),
                "must be >= 1",
            ));
        }
        if !self.drop_rate_ceiling.is_finite() || !(-100.0..=0.0).contains(&self.drop_rate_ceiling)
        {
            return Err(invalid(
                "drop_rate_ceiling",
                self.drop_rate_ceiling,
                "must be within [-100, 0]",
            ));
        }
        Ok(())
    }

    /// Returns `candidate` if it is valid, otherwise logs the rejection and
    /// keeps `self`.
    pub fn replace_with(&self, candidate: ThresholdConfig) -> ThresholdConfig {
        match candidate.validate() {
            Ok(()) => candidate,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected threshold configuration, keeping previous");
                self.clone()
            }
        }
    }
}

fn invalid(field: &'static str, value: f64, reason: &str) -> EvaluationError {
    EvaluationError::InvalidConfiguration {
        field,
        value,
        reason: reason.to_string(),
    }
}
