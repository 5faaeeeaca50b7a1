//! End-to-end tests for the `seomon` binary.

mod common;

use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use common::{build_test_context, TestContext};
use predicates::prelude::*;
use seomon_alert::Evaluation;
use seomon_common::types::SystemStatus;

const ALERTING_ROWS: &[&str] = &["2024-01-01,1000,3.0,4", "2024-01-02,850,1.5,12"];
const HEALTHY_ROWS: &[&str] = &["2024-01-01,900,3.0,4", "2024-01-02,950,3.5,3"];

/// Runs `seomon` inside the test directory so no stray `seomon.toml` is read.
fn seomon(ctx: &TestContext) -> Command {
    let mut cmd = cargo_bin_cmd!("seomon");
    cmd.current_dir(ctx.temp_dir.path());
    cmd
}

#[test]
fn check_exits_with_alert_code() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_dataset("seo.csv", ALERTING_ROWS)?;

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[WARNING] Low CTR detected: 1.5%"))
        .stdout(predicate::str::contains("System Status: ALERT MODE"));
    Ok(())
}

#[test]
fn check_exits_cleanly_when_normal() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_dataset("seo.csv", HEALTHY_ROWS)?;

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No alerts"))
        .stdout(predicate::str::contains("System Status: NORMAL"));
    Ok(())
}

#[test]
fn check_json_parses_into_evaluation() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_dataset("seo.csv", ALERTING_ROWS)?;

    let output = seomon(&ctx)
        .arg("check")
        .arg(&data)
        .arg("--json")
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let evaluation: Evaluation = serde_json::from_slice(&output)?;
    assert_eq!(evaluation.status, SystemStatus::Alert);
    assert_eq!(evaluation.records.len(), 2);
    assert_eq!(evaluation.records[0].traffic_change_pct, None);
    let ids: Vec<&str> = evaluation.alerts.iter().map(|a| a.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["ctr_floor", "rank_ceiling", "drop_rate"]);
    Ok(())
}

#[test]
fn config_file_thresholds_apply_and_flags_override_them() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_dataset("seo.csv", HEALTHY_ROWS)?;
    let config = ctx.write_file("strict.toml", "[thresholds]\ntraffic_floor = 1000.0\n")?;

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "[CRITICAL] Traffic dropped to 950 visitors",
        ));

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .args(["--traffic-floor", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System Status: NORMAL"));
    Ok(())
}

#[test]
fn default_config_is_read_from_working_directory() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_dataset("seo.csv", HEALTHY_ROWS)?;
    ctx.write_file("seomon.toml", "locale = \"zh-CN\"\n\n[thresholds]\nrank_ceiling = 2\n")?;

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("当前流量: 950"));
    Ok(())
}

#[test]
fn invalid_threshold_flag_fails() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_dataset("seo.csv", HEALTHY_ROWS)?;

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .args(["--ctr-floor", "150"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ctr_floor"));
    Ok(())
}

#[test]
fn missing_columns_fail_before_evaluation() -> Result<()> {
    let ctx = build_test_context()?;
    let data = ctx.write_file("seo.csv", "Time,Traffic\n09:00,900\n")?;

    seomon(&ctx)
        .arg("check")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column(s)"));
    Ok(())
}
