use seomon_common::types::AnnotatedRecord;
use serde::{Deserialize, Serialize};

/// Headline figures for the latest period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub current_traffic: f64,
    pub current_ctr: f64,
    pub current_rank: u32,
    /// Mean traffic over the whole series.
    pub avg_traffic: f64,
    pub latest_change_pct: Option<f64>,
}

impl Kpis {
    /// Returns `None` for an empty series.
    pub fn from_records(records: &[AnnotatedRecord]) -> Option<Self> {
        let latest = records.last()?;
        let total: f64 = records.iter().map(|r| r.record.traffic).sum();

        Some(Self {
            current_traffic: latest.record.traffic,
            current_ctr: latest.record.ctr,
            current_rank: latest.record.keyword_rank,
            avg_traffic: total / records.len() as f64,
            latest_change_pct: latest.traffic_change_pct,
        })
    }
}
