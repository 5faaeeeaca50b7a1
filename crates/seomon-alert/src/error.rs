/// Errors reported by the alert evaluator.
///
/// Every variant describes bad input; evaluation is deterministic, so
/// retrying with the same input always fails the same way.
///
/// # Examples
///
/// ```rust
/// use seomon_alert::error::EvaluationError;
///
/// let err = EvaluationError::InvalidConfiguration {
///     field: "ctr_floor",
///     value: 120.0,
///     reason: "must be within [0, 100]".to_string(),
/// };
/// assert!(err.to_string().contains("ctr_floor"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// No records were supplied, so there is no latest record to evaluate.
    #[error("Empty dataset: at least one record is required")]
    EmptyDataset,

    /// A threshold is outside its valid range. Raised before any rule runs.
    #[error("Invalid threshold {field} = {value}: {reason}")]
    InvalidConfiguration {
        field: &'static str,
        value: f64,
        reason: String,
    },

    /// A record violates the input constraints (negative traffic, CTR
    /// outside `[0, 100]`, rank 0, non-finite numbers).
    #[error("Invalid record at index {index} ({timestamp}): {reason}")]
    InvalidRecord {
        index: usize,
        timestamp: String,
        reason: String,
    },
}

/// Convenience type alias so callers can write `error::Result<T>`.
pub type Result<T> = std::result::Result<T, EvaluationError>;
