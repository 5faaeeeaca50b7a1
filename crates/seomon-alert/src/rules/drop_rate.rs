use crate::{AlertRule, RuleScope};
use seomon_common::i18n::TRANSLATIONS;
use seomon_common::types::{AlertEvent, AnnotatedRecord, Metric, Severity};

/// Fires when the period-over-period traffic change is at or below
/// `ceiling` (a negative percentage). Records without a defined change are
/// skipped.
pub struct DropRateRule {
    pub id: String,
    pub severity: Severity,
    pub ceiling: f64,
}

impl AlertRule for DropRateRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn scope(&self) -> RuleScope {
        RuleScope::History
    }

    fn evaluate(&self, record: &AnnotatedRecord, locale: &str) -> Option<AlertEvent> {
        let rate = record.traffic_change_pct?;

        if rate > self.ceiling {
            return None;
        }

        let tmpl = TRANSLATIONS.get(
            locale,
            "alert.drop_rate",
            "Traffic dropped by {rate:.2}% on {timestamp}",
        );
        let message = tmpl
            .replace("{rate:.2}", &format!("{:.2}", rate))
            .replace("{timestamp}", record.timestamp());

        Some(AlertEvent {
            rule_id: self.id.clone(),
            metric: Metric::TrafficChangePct,
            severity: self.severity,
            message,
            timestamp: record.timestamp().to_string(),
            value: rate,
            threshold: self.ceiling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seomon_common::types::Record;

    fn rule() -> DropRateRule {
        DropRateRule {
            id: "drop_rate".into(),
            severity: Severity::Critical,
            ceiling: -10.0,
        }
    }

    fn record(change: Option<f64>) -> AnnotatedRecord {
        AnnotatedRecord {
            record: Record::new("2024-01-02", 850.0, 3.0, 5),
            traffic_change_pct: change,
        }
    }

    #[test]
    fn fires_on_drop_beyond_ceiling() {
        let event = rule().evaluate(&record(Some(-15.0)), "en").unwrap();
        assert_eq!(event.severity, Severity::Critical);
        assert_eq!(event.metric, Metric::TrafficChangePct);
        assert_eq!(event.message, "Traffic dropped by -15.00% on 2024-01-02");
        assert_eq!(event.value, -15.0);
    }

    #[test]
    fn ceiling_is_inclusive() {
        assert!(rule().evaluate(&record(Some(-10.0)), "en").is_some());
        assert!(rule().evaluate(&record(Some(-9.99)), "en").is_none());
    }

    #[test]
    fn undefined_change_is_skipped() {
        assert!(rule().evaluate(&record(None), "en").is_none());
    }

    #[test]
    fn rule_scans_history() {
        assert_eq!(rule().scope(), RuleScope::History);
    }
}
