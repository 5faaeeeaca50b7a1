//! Period-over-period traffic change.

use seomon_common::types::{AnnotatedRecord, Record};

/// Percentage change from `previous` to `current`.
///
/// Returns `None` when there is no usable baseline: a zero previous value
/// or a non-finite operand. No rounding is applied.
///
/// # Examples
///
/// ```
/// use seomon_alert::change::percent_change;
///
/// assert_eq!(percent_change(1000.0, 850.0), Some(-15.0));
/// assert_eq!(percent_change(0.0, 850.0), None);
/// ```
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Annotates each record with its traffic change relative to the record
/// before it. The output has the same length and order as `records`; the
/// first entry has no change value.
pub fn annotate(records: &[Record]) -> Vec<AnnotatedRecord> {
    let mut annotated = Vec::with_capacity(records.len());
    let mut previous: Option<&Record> = None;

    for record in records {
        let traffic_change_pct = previous.and_then(|prev| percent_change(prev.traffic, record.traffic));
        annotated.push(AnnotatedRecord {
            record: record.clone(),
            traffic_change_pct,
        });
        previous = Some(record);
    }

    annotated
}
