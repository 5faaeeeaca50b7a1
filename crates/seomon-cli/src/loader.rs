//! CSV loading for SEO metric datasets.
//!
//! Required columns are `Time` (or `Date`), `Traffic`, `CTR` and
//! `Keyword_Rank`. The whole dataset is rejected on the first schema
//! problem; nothing is returned partially.

use seomon_common::types::{Metric, Record};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Accepted headers for the ordering column, in preference order.
const TIME_COLUMNS: &[&str] = &["Time", "Date"];

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid dataset format: missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid value '{value}' in column {column} at row {row}: {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },
}

struct ColumnIndex {
    time: usize,
    traffic: usize,
    ctr: usize,
    keyword_rank: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, SchemaError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let time = TIME_COLUMNS.iter().find_map(|name| find(*name));
        let traffic = find(Metric::Traffic.column());
        let ctr = find(Metric::Ctr.column());
        let keyword_rank = find(Metric::KeywordRank.column());

        match (time, traffic, ctr, keyword_rank) {
            (Some(time), Some(traffic), Some(ctr), Some(keyword_rank)) => Ok(Self {
                time,
                traffic,
                ctr,
                keyword_rank,
            }),
            _ => {
                let mut missing = Vec::new();
                if time.is_none() {
                    missing.push(TIME_COLUMNS[0].to_string());
                }
                for (idx, metric) in [
                    (traffic, Metric::Traffic),
                    (ctr, Metric::Ctr),
                    (keyword_rank, Metric::KeywordRank),
                ] {
                    if idx.is_none() {
                        missing.push(metric.column().to_string());
                    }
                }
                Err(SchemaError::MissingColumns(missing))
            }
        }
    }
}

/// Loads and validates every record in the CSV file at `path`.
pub fn load_records(path: &Path) -> Result<Vec<Record>, SchemaError> {
    let file = File::open(path).map_err(|source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_records(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), count = records.len(), "Loaded dataset");
    Ok(records)
}

/// Parses CSV from `reader`. Rows are numbered from 1, excluding the header.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, SchemaError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let raw = result?;
        let field = |idx: usize| raw.get(idx).unwrap_or("");

        let traffic = parse_traffic(row, field(columns.traffic))?;
        let ctr = parse_ctr(row, field(columns.ctr))?;
        let keyword_rank = parse_rank(row, field(columns.keyword_rank))?;

        records.push(Record::new(
            field(columns.time),
            traffic,
            ctr,
            keyword_rank,
        ));
    }

    Ok(records)
}

fn invalid(row: usize, metric: Metric, value: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidValue {
        row,
        column: metric.column().to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number(row: usize, metric: Metric, value: &str) -> Result<f64, SchemaError> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| invalid(row, metric, value, "not a number"))?;
    if !parsed.is_finite() {
        return Err(invalid(row, metric, value, "not a finite number"));
    }
    Ok(parsed)
}

fn parse_traffic(row: usize, value: &str) -> Result<f64, SchemaError> {
    let traffic = parse_number(row, Metric::Traffic, value)?;
    if traffic < 0.0 {
        return Err(invalid(row, Metric::Traffic, value, "must be >= 0"));
    }
    Ok(traffic)
}

fn parse_ctr(row: usize, value: &str) -> Result<f64, SchemaError> {
    let stripped = value.strip_suffix('%').unwrap_or(value).trim_end();
    let ctr = parse_number(row, Metric::Ctr, stripped)?;
    if !(0.0..=100.0).contains(&ctr) {
        return Err(invalid(row, Metric::Ctr, value, "must be within [0, 100]"));
    }
    Ok(ctr)
}

fn parse_rank(row: usize, value: &str) -> Result<u32, SchemaError> {
    if let Ok(rank) = value.parse::<u32>() {
        return if rank >= 1 {
            Ok(rank)
        } else {
            Err(invalid(row, Metric::KeywordRank, value, "must be >= 1"))
        };
    }

    // Spreadsheet exports often write integers as "12.0".
    let rank = parse_number(row, Metric::KeywordRank, value)?;
    if rank.fract() != 0.0 {
        return Err(invalid(row, Metric::KeywordRank, value, "must be a whole number"));
    }
    if rank < 1.0 || rank > f64::from(u32::MAX) {
        return Err(invalid(row, Metric::KeywordRank, value, "must be >= 1"));
    }
    Ok(rank as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_dataset_in_order() {
        let csv = "Time,Traffic,CTR,Keyword_Rank\n\
                   09:00,1200,3.4,5\n\
                   10:00,1100,3.1,6\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("09:00", 1200.0, 3.4, 5),
                Record::new("10:00", 1100.0, 3.1, 6),
            ]
        );
    }

    #[test]
    fn accepts_date_column_extra_columns_and_reordering() {
        let csv = "Keyword_Rank,Source,CTR,Date,Traffic\n\
                   7, organic ,2.5,2024-01-01,980\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records, vec![Record::new("2024-01-01", 980.0, 2.5, 7)]);
    }

    #[test]
    fn reports_every_missing_column() {
        let csv = "Time,Traffic\n09:00,100\n";
        match parse_records(csv.as_bytes()).unwrap_err() {
            SchemaError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["CTR".to_string(), "Keyword_Rank".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_time_column_is_named() {
        let csv = "Traffic,CTR,Keyword_Rank\n100,2.0,4\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid dataset format: missing required column(s): Time"
        );
    }

    #[test]
    fn rejects_non_numeric_traffic() {
        let csv = "Time,Traffic,CTR,Keyword_Rank\n09:00,100,2.0,4\n10:00,lots,2.0,4\n";
        match parse_records(csv.as_bytes()).unwrap_err() {
            SchemaError::InvalidValue {
                row, column, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Traffic");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_negative_traffic_and_out_of_range_ctr() {
        let negative = "Time,Traffic,CTR,Keyword_Rank\n09:00,-1,2.0,4\n";
        assert!(parse_records(negative.as_bytes()).is_err());

        let ctr = "Time,Traffic,CTR,Keyword_Rank\n09:00,10,120,4\n";
        assert!(parse_records(ctr.as_bytes()).is_err());
    }

    #[test]
    fn ctr_accepts_percent_suffix() {
        let csv = "Time,Traffic,CTR,Keyword_Rank\n09:00,10,2.5%,4\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].ctr, 2.5);
    }

    #[test]
    fn rank_accepts_integral_floats_only() {
        let ok = "Time,Traffic,CTR,Keyword_Rank\n09:00,10,2.5,12.0\n";
        assert_eq!(parse_records(ok.as_bytes()).unwrap()[0].keyword_rank, 12);

        for bad in ["12.5", "0", "-3", "first"] {
            let csv = format!("Time,Traffic,CTR,Keyword_Rank\n09:00,10,2.5,{bad}\n");
            assert!(parse_records(csv.as_bytes()).is_err(), "accepted rank {bad}");
        }
    }

    #[test]
    fn header_only_dataset_yields_no_records() {
        let csv = "Time,Traffic,CTR,Keyword_Rank\n";
        assert!(parse_records(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn load_records_reports_missing_file() {
        let err = load_records(Path::new("/nonexistent/seo.csv")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/seo.csv"));
    }
}
