use crate::AlertRule;
use seomon_common::i18n::TRANSLATIONS;
use seomon_common::types::{AlertEvent, AnnotatedRecord, Metric, Severity};

/// Strict comparison of an observed value against a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    GreaterThan,
    LessThan,
}

impl CompareOp {
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
        }
    }
}

/// Renders an observed value for a message. CTR is a ratio and always
/// keeps at least one decimal place (`1.0`, `1.5`); other metrics use the
/// shortest form (`880`, `12`).
fn format_observed(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Ctr if value.fract() == 0.0 => format!("{value:.1}"),
        _ => value.to_string(),
    }
}

/// Fires when a metric of the latest record crosses a fixed limit.
pub struct ThresholdRule {
    pub id: String,
    pub metric: Metric,
    pub severity: Severity,
    pub operator: CompareOp,
    pub value: f64,
    /// Translation key of the message template; `{value}` is substituted.
    pub message_key: &'static str,
}

impl AlertRule for ThresholdRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, record: &AnnotatedRecord, locale: &str) -> Option<AlertEvent> {
        let observed = self.metric.value_of(record)?;

        if !self.operator.check(observed, self.value) {
            return None;
        }

        let tmpl = TRANSLATIONS.get(locale, self.message_key, "{metric} is {value}");
        let message = tmpl
            .replace("{metric}", &self.metric.to_string())
            .replace("{value}", &format_observed(self.metric, observed));

        Some(AlertEvent {
            rule_id: self.id.clone(),
            metric: self.metric,
            severity: self.severity,
            message,
            timestamp: record.timestamp().to_string(),
            value: observed,
            threshold: self.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seomon_common::types::Record;

    fn ctr_rule() -> ThresholdRule {
        ThresholdRule {
            id: "ctr_floor".into(),
            metric: Metric::Ctr,
            severity: Severity::Warning,
            operator: CompareOp::LessThan,
            value: 2.0,
            message_key: "alert.ctr_floor",
        }
    }

    fn record(ctr: f64) -> AnnotatedRecord {
        AnnotatedRecord {
            record: Record::new("2024-01-05", 900.0, ctr, 4),
            traffic_change_pct: None,
        }
    }

    #[test]
    fn compare_op_is_strict() {
        assert!(CompareOp::LessThan.check(1.9, 2.0));
        assert!(!CompareOp::LessThan.check(2.0, 2.0));
        assert!(CompareOp::GreaterThan.check(11.0, 10.0));
        assert!(!CompareOp::GreaterThan.check(10.0, 10.0));
    }

    #[test]
    fn fires_below_floor_with_formatted_message() {
        let event = ctr_rule().evaluate(&record(1.5), "en").unwrap();
        assert_eq!(event.severity, Severity::Warning);
        assert_eq!(event.message, "Low CTR detected: 1.5%");
        assert_eq!(event.timestamp, "2024-01-05");
        assert_eq!(event.value, 1.5);
        assert_eq!(event.threshold, 2.0);
    }

    #[test]
    fn whole_ctr_keeps_one_decimal() {
        let event = ctr_rule().evaluate(&record(1.0), "en").unwrap();
        assert_eq!(event.message, "Low CTR detected: 1.0%");
        assert_eq!(format_observed(Metric::Traffic, 880.0), "880");
        assert_eq!(format_observed(Metric::KeywordRank, 12.0), "12");
    }

    #[test]
    fn strict_comparison_at_boundary() {
        assert!(ctr_rule().evaluate(&record(2.0), "en").is_none());
    }

    #[test]
    fn message_follows_locale() {
        let event = ctr_rule().evaluate(&record(1.0), "zh-CN").unwrap();
        assert_eq!(event.message, "点击率过低：1.0%");
    }
}
