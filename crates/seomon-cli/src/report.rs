//! Console rendering and CSV/JSON export of evaluation results.

use anyhow::Result;
use csv::Writer;
use seomon_alert::kpi::Kpis;
use seomon_alert::Evaluation;
use seomon_common::i18n::TRANSLATIONS;
use seomon_common::types::{AlertEvent, AnnotatedRecord, Severity};
use std::fmt::Write;
use std::path::Path;

/// Column headers of the exported CSV report.
pub const REPORT_HEADERS: [&str; 5] = [
    "Time",
    "Traffic",
    "CTR",
    "Keyword_Rank",
    "Traffic_Change_%",
];

fn format_change(change: Option<f64>) -> String {
    change.map(|pct| format!("{pct:.2}")).unwrap_or_else(|| "-".to_string())
}

/// Plain-text table of the annotated series.
pub fn render_table(records: &[AnnotatedRecord]) -> String {
    let width = records
        .iter()
        .map(|r| r.timestamp().len())
        .chain(std::iter::once(REPORT_HEADERS[0].len()))
        .max()
        .unwrap_or(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>10}  {:>6}  {:>12}  {:>16}",
        REPORT_HEADERS[0],
        REPORT_HEADERS[1],
        REPORT_HEADERS[2],
        REPORT_HEADERS[3],
        REPORT_HEADERS[4],
        width = width,
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<width$}  {:>10}  {:>6.2}  {:>12}  {:>16}",
            r.timestamp(),
            r.record.traffic,
            r.record.ctr,
            r.record.keyword_rank,
            format_change(r.traffic_change_pct),
            width = width,
        );
    }
    out
}

pub fn render_kpis(kpis: &Kpis, locale: &str) -> String {
    let t = &*TRANSLATIONS;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}",
        t.get(locale, "report.kpi.current_traffic", "Current Traffic"),
        kpis.current_traffic.trunc()
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t.get(locale, "report.kpi.current_ctr", "Current CTR (%)"),
        kpis.current_ctr
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t.get(locale, "report.kpi.current_rank", "Current Rank"),
        kpis.current_rank
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t.get(locale, "report.kpi.avg_traffic", "Avg Traffic"),
        kpis.avg_traffic.trunc()
    );
    out
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[CRITICAL]",
        Severity::Warning => "[WARNING]",
        Severity::Info => "[INFO]",
    }
}

/// Live alerts followed by the status line.
pub fn render_alerts(evaluation: &Evaluation, locale: &str) -> String {
    let t = &*TRANSLATIONS;
    let mut out = String::new();
    if evaluation.alerts.is_empty() {
        let _ = writeln!(out, "{}", t.get(locale, "report.no_alerts", "No alerts"));
    }
    for alert in &evaluation.alerts {
        let _ = writeln!(out, "{} {}", severity_tag(alert.severity), alert.message);
    }
    let status_line = if evaluation.status.is_alert() {
        t.get(locale, "report.status_alert", "System Status: ALERT MODE")
    } else {
        t.get(locale, "report.status_normal", "System Status: NORMAL")
    };
    let _ = writeln!(out, "{status_line}");
    out
}

/// Audit listing of historical alerts, one line per event.
pub fn render_history(history: &[AlertEvent]) -> String {
    let mut out = String::from("Alert System Output:\n");
    for event in history {
        let _ = writeln!(out, "ALERT: {}", event.message);
    }
    out
}

/// KPIs, live alerts and status in one block.
pub fn render_evaluation(evaluation: &Evaluation, locale: &str) -> String {
    let mut out = render_kpis(&evaluation.kpis, locale);
    out.push('\n');
    out.push_str(&render_alerts(evaluation, locale));
    out
}

pub fn to_json(evaluation: &Evaluation) -> Result<String> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}

/// Export the annotated series to CSV. Undefined changes are left empty.
pub fn export_csv(records: &[AnnotatedRecord]) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);

    writer.write_record(REPORT_HEADERS)?;

    for r in records {
        writer.write_record([
            r.timestamp().to_string(),
            r.record.traffic.to_string(),
            r.record.ctr.to_string(),
            r.record.keyword_rank.to_string(),
            r.traffic_change_pct.map(|pct| pct.to_string()).unwrap_or_default(),
        ])?;
    }

    let csv_data = String::from_utf8(writer.into_inner()?)?;
    Ok(csv_data)
}

pub fn write_csv_report(path: &Path, records: &[AnnotatedRecord]) -> Result<()> {
    let csv_data = export_csv(records)?;
    std::fs::write(path, csv_data)
        .map_err(|e| anyhow::anyhow!("Failed to write report '{}': {}", path.display(), e))?;
    tracing::info!(path = %path.display(), rows = records.len(), "Report written");
    Ok(())
}
