pub mod drop_rate;
pub mod threshold;

use crate::config::ThresholdConfig;
use crate::AlertRule;
use drop_rate::DropRateRule;
use seomon_common::types::{Metric, Severity};
use threshold::{CompareOp, ThresholdRule};

/// Builds the built-in rule set from `config`, in reporting order:
/// traffic floor, CTR floor, rank ceiling, drop rate.
pub fn build_rules(config: &ThresholdConfig) -> Vec<Box<dyn AlertRule>> {
    vec![
        Box::new(ThresholdRule {
            id: "traffic_floor".into(),
            metric: Metric::Traffic,
            severity: Severity::Critical,
            operator: CompareOp::LessThan,
            value: config.traffic_floor,
            message_key: "alert.traffic_floor",
        }),
        Box::new(ThresholdRule {
            id: "ctr_floor".into(),
            metric: Metric::Ctr,
            severity: Severity::Warning,
            operator: CompareOp::LessThan,
            value: config.ctr_floor,
            message_key: "alert.ctr_floor",
        }),
        Box::new(ThresholdRule {
            id: "rank_ceiling".into(),
            metric: Metric::KeywordRank,
            severity: Severity::Info,
            operator: CompareOp::GreaterThan,
            value: f64::from(config.rank_ceiling),
            message_key: "alert.rank_ceiling",
        }),
        Box::new(DropRateRule {
            id: "drop_rate".into(),
            severity: Severity::Critical,
            ceiling: config.drop_rate_ceiling,
        }),
    ]
}
