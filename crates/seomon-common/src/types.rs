use serde::{Deserialize, Serialize};

/// One observation of a site's search performance.
///
/// `timestamp` is an opaque ordering token taken verbatim from the data
/// source (e.g. `"10:00"` or `"2024-03-01"`). Chronological order is the
/// order of the sequence the record lives in, not a parse of this field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: String,
    /// Visitors in the period, non-negative.
    pub traffic: f64,
    /// Click-through rate as a percentage in `[0, 100]`.
    pub ctr: f64,
    /// Search position, 1 is best.
    pub keyword_rank: u32,
}

impl Record {
    pub fn new(timestamp: impl Into<String>, traffic: f64, ctr: f64, keyword_rank: u32) -> Self {
        Self {
            timestamp: timestamp.into(),
            traffic,
            ctr,
            keyword_rank,
        }
    }
}

/// A [`Record`] together with its period-over-period traffic change.
///
/// `traffic_change_pct` is `None` for the first record of a series and
/// whenever the previous period had zero traffic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub traffic_change_pct: Option<f64>,
}

impl AnnotatedRecord {
    pub fn timestamp(&self) -> &str {
        &self.record.timestamp
    }
}

/// A metric column that alert rules can inspect.
///
/// # Examples
///
/// ```
/// use seomon_common::types::Metric;
///
/// let metric = Metric::KeywordRank;
/// assert_eq!(metric.column(), "Keyword_Rank");
/// assert_eq!(metric.to_string(), "keyword_rank");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Traffic,
    Ctr,
    KeywordRank,
    TrafficChangePct,
}

impl Metric {
    /// Column header used for this metric in tabular input and reports.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Traffic => "Traffic",
            Metric::Ctr => "CTR",
            Metric::KeywordRank => "Keyword_Rank",
            Metric::TrafficChangePct => "Traffic_Change_%",
        }
    }

    /// Reads this metric from an annotated record. Returns `None` when the
    /// value is undefined (only possible for the change column).
    pub fn value_of(&self, record: &AnnotatedRecord) -> Option<f64> {
        match self {
            Metric::Traffic => Some(record.record.traffic),
            Metric::Ctr => Some(record.record.ctr),
            Metric::KeywordRank => Some(f64::from(record.record.keyword_rank)),
            Metric::TrafficChangePct => record.traffic_change_pct,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Traffic => write!(f, "traffic"),
            Metric::Ctr => write!(f, "ctr"),
            Metric::KeywordRank => write!(f, "keyword_rank"),
            Metric::TrafficChangePct => write!(f, "traffic_change_pct"),
        }
    }
}

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use seomon_common::types::Severity;
///
/// let sev = Severity::Warning;
/// assert_eq!(sev.to_string(), "warning");
/// assert!(Severity::Critical > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Identifier of the rule that fired (e.g. `"traffic_floor"`).
    pub rule_id: String,
    pub metric: Metric,
    pub severity: Severity,
    pub message: String,
    /// Timestamp token of the record that triggered the rule.
    pub timestamp: String,
    /// The triggering metric value.
    pub value: f64,
    /// The configured limit the value crossed.
    pub threshold: f64,
}

/// Aggregate flag for one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Normal,
    Alert,
}

impl SystemStatus {
    pub fn from_alerts(alerts: &[AlertEvent]) -> Self {
        if alerts.is_empty() {
            SystemStatus::Normal
        } else {
            SystemStatus::Alert
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, SystemStatus::Alert)
    }
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemStatus::Normal => write!(f, "NORMAL"),
            SystemStatus::Alert => write!(f, "ALERT"),
        }
    }
}
