use crate::config::ThresholdConfig;
use crate::error::{EvaluationError, Result};
use crate::kpi::Kpis;
use crate::rules::build_rules;
use crate::{AlertRule, RuleScope};
use seomon_common::i18n::DEFAULT_LOCALE;
use seomon_common::types::{AlertEvent, AnnotatedRecord, Record, SystemStatus};
use serde::{Deserialize, Serialize};

/// Result of one evaluation pass. Built in full before it is returned, so
/// callers never observe a partial alert list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub records: Vec<AnnotatedRecord>,
    /// Live alerts for the latest record, in rule order.
    pub alerts: Vec<AlertEvent>,
    /// Audit scan of history-scoped rules over every record, oldest first.
    pub history: Vec<AlertEvent>,
    /// Derived from `alerts` only.
    pub status: SystemStatus,
    pub kpis: Kpis,
}

pub struct AlertEvaluator {
    rules: Vec<Box<dyn AlertRule>>,
    locale: String,
}

impl AlertEvaluator {
    /// Validates `config` and registers the built-in rules for it.
    pub fn new(config: ThresholdConfig) -> Result<Self> {
        config.validate()?;
        let rules = build_rules(&config);
        Ok(Self {
            rules,
            locale: DEFAULT_LOCALE.to_string(),
        })
    }

    /// Sets the locale alert messages are rendered in.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    pub fn rules(&self) -> &[Box<dyn AlertRule>] {
        &self.rules
    }

    pub fn evaluate(&self, records: &[AnnotatedRecord]) -> Result<Evaluation> {
        let latest = records.last().ok_or(EvaluationError::EmptyDataset)?;
        for (index, annotated) in records.iter().enumerate() {
            check_record(index, &annotated.record)?;
        }

        let mut alerts = Vec::new();
        for rule in &self.rules {
            if let Some(event) = rule.evaluate(latest, &self.locale) {
                tracing::debug!(
                    rule_id = rule.id(),
                    severity = %rule.severity(),
                    timestamp = %event.timestamp,
                    value = event.value,
                    "Rule fired on latest record"
                );
                alerts.push(event);
            }
        }

        let mut history = Vec::new();
        for record in records {
            for rule in self.rules.iter().filter(|r| r.scope() == RuleScope::History) {
                if let Some(event) = rule.evaluate(record, &self.locale) {
                    history.push(event);
                }
            }
        }

        let kpis = Kpis::from_records(records).ok_or(EvaluationError::EmptyDataset)?;
        let status = SystemStatus::from_alerts(&alerts);

        tracing::debug!(
            records = records.len(),
            alerts = alerts.len(),
            history = history.len(),
            status = %status,
            "Evaluation complete"
        );

        Ok(Evaluation {
            records: records.to_vec(),
            alerts,
            history,
            status,
            kpis,
        })
    }
}

fn check_record(index: usize, record: &Record) -> Result<()> {
    let reason = if !record.traffic.is_finite() || record.traffic < 0.0 {
        format!("traffic {} must be a finite number >= 0", record.traffic)
    } else if !record.ctr.is_finite() || !(0.0..=100.0).contains(&record.ctr) {
        format!("ctr {} must be within [0, 100]", record.ctr)
    } else if record.keyword_rank == 0 {
        "keyword_rank must be >= 1".to_string()
    } else {
        return Ok(());
    };

    Err(EvaluationError::InvalidRecord {
        index,
        timestamp: record.timestamp.clone(),
        reason,
    })
}
