use anyhow::Result;
use clap::Parser;
use seomon_alert::change::annotate;
use seomon_alert::{AlertEvaluator, ThresholdConfig};
use std::process::ExitCode;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

use seomon_cli::cli::{Cli, Command, EvalArgs};
use seomon_cli::config::AppConfig;
use seomon_cli::loader::load_records;
use seomon_cli::report;
use seomon_cli::watch::Watcher;

/// Exit code for `check` when the latest record raised alerts.
const EXIT_ALERT: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("seomon=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { data } => {
            let records = load_records(&data)?;
            print!("{}", report::render_table(&annotate(&records)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Alerts(args) => {
            let (config, thresholds) = resolve(&args)?;
            let evaluation = build_evaluator(&config, &args, thresholds)?
                .evaluate(&annotate(&load_records(&args.data)?))?;
            print!("{}", report::render_history(&evaluation.history));
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { eval, json } => {
            let (config, thresholds) = resolve(&eval)?;
            let evaluation = build_evaluator(&config, &eval, thresholds)?
                .evaluate(&annotate(&load_records(&eval.data)?))?;

            if json {
                println!("{}", report::to_json(&evaluation)?);
            } else {
                print!("{}", report::render_evaluation(&evaluation, &locale(&config, &eval)));
            }

            if evaluation.status.is_alert() {
                Ok(ExitCode::from(EXIT_ALERT))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Report { data, output } => {
            let records = load_records(&data)?;
            report::write_csv_report(&output, &annotate(&records))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Watch {
            eval,
            interval_secs,
        } => {
            let (config, _) = resolve(&eval)?;
            let every = Duration::from_secs(interval_secs.unwrap_or(config.refresh_secs).max(1));
            let watcher = Watcher::new(
                eval.data.clone(),
                eval.config.clone(),
                eval.thresholds.clone(),
                eval.locale.clone(),
                &config,
            )?;
            watcher.run(every).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Loads the config file and layers the command-line overrides on top.
fn resolve(args: &EvalArgs) -> Result<(AppConfig, ThresholdConfig)> {
    let config = AppConfig::resolve(args.config.as_deref())?;
    let thresholds = args.thresholds.apply(&config.thresholds);
    tracing::debug!(?thresholds, "Resolved thresholds");
    Ok((config, thresholds))
}

fn locale(config: &AppConfig, args: &EvalArgs) -> String {
    config.locale_for(args.locale.as_deref())
}

fn build_evaluator(
    config: &AppConfig,
    args: &EvalArgs,
    thresholds: ThresholdConfig,
) -> Result<AlertEvaluator> {
    let evaluator = AlertEvaluator::new(thresholds)?.with_locale(&locale(config, args));
    let rule_ids: Vec<&str> = evaluator.rules().iter().map(|r| r.id()).collect();
    tracing::debug!(rules = ?rule_ids, "Evaluator ready");
    Ok(evaluator)
}
