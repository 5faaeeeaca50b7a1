//! Change detection and threshold alerting for SEO metric series.
//!
//! [`change::annotate`] derives the traffic change series from raw records,
//! and [`engine::AlertEvaluator`] runs the registered [`AlertRule`]s
//! against the latest record (live alerts) and, for history-scoped rules,
//! against every record (audit scan). Built-in rule types are fixed
//! thresholds on a metric of the latest record and the traffic drop rate.

pub mod change;
pub mod config;
pub mod engine;
pub mod error;
pub mod kpi;
pub mod rules;


use seomon_common::types::{AlertEvent, AnnotatedRecord, Record, Severity};

pub use config::ThresholdConfig;
pub use engine::{AlertEvaluator, Evaluation};
pub use error::EvaluationError;

/// Which records a rule is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Only the most recent record.
    Latest,
    /// The most recent record for live alerts, plus every record in the
    /// series for the audit scan.
    History,
}

/// An alert rule that inspects one annotated record and optionally
/// produces an [`AlertEvent`].
///
/// Implementations are registered in the [`engine::AlertEvaluator`], which
/// decides which records each rule sees based on [`AlertRule::scope`].
/// Evaluation must be pure: the same record always yields the same event.
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule instance (e.g., `"traffic_floor"`).
    fn id(&self) -> &str;

    /// The severity level assigned to alerts produced by this rule.
    fn severity(&self) -> Severity;

    fn scope(&self) -> RuleScope {
        RuleScope::Latest
    }

    /// Evaluates a single record and returns an alert event if the rule
    /// condition is met, or `None` otherwise. Messages are rendered in
    /// `locale`.
    fn evaluate(&self, record: &AnnotatedRecord, locale: &str) -> Option<AlertEvent>;
}

/// Annotates `records` and evaluates them against `config`.
///
/// This is the stateless entry point a scheduler calls on every refresh.
///
/// # Examples
///
/// ```
/// use seomon_alert::{evaluate, ThresholdConfig};
/// use seomon_common::types::{Record, SystemStatus};
///
/// let records = vec![
///     Record::new("09:00", 1000.0, 4.0, 3),
///     Record::new("10:00", 850.0, 4.0, 3),
/// ];
/// let config = ThresholdConfig { traffic_floor: 100.0, ..Default::default() };
/// let evaluation = evaluate(&records, &config).unwrap();
/// assert_eq!(evaluation.alerts.len(), 1);
/// assert_eq!(evaluation.status, SystemStatus::Alert);
/// ```
pub fn evaluate(records: &[Record], config: &ThresholdConfig) -> error::Result<Evaluation> {
    let evaluator = AlertEvaluator::new(config.clone())?;
    evaluator.evaluate(&change::annotate(records))
}
