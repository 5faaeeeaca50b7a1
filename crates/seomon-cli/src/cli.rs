//! Command-line interface definitions.

use crate::config::ThresholdOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "seomon", version, about = "SEO metrics change detection and alerting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the dataset with period-over-period traffic change
    Analyze {
        /// CSV file with Time, Traffic, CTR and Keyword_Rank columns
        data: PathBuf,
    },
    /// List every historical traffic drop at or below the drop-rate ceiling
    Alerts(EvalArgs),
    /// Evaluate the latest record: KPIs, live alerts and system status
    Check {
        #[command(flatten)]
        eval: EvalArgs,
        /// Print the full evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the annotated dataset as a CSV report
    Report {
        data: PathBuf,
        /// Destination file
        #[arg(short, long, default_value = "seo_analytics_report.csv")]
        output: PathBuf,
    },
    /// Re-evaluate the dataset on a fixed interval until interrupted
    Watch {
        #[command(flatten)]
        eval: EvalArgs,
        /// Seconds between evaluations (overrides refresh_secs from the config)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EvalArgs {
    /// CSV file with Time, Traffic, CTR and Keyword_Rank columns
    pub data: PathBuf,
    /// TOML config file (defaults to ./seomon.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Locale for messages (en, zh-CN)
    #[arg(long)]
    pub locale: Option<String>,
    #[command(flatten)]
    pub thresholds: ThresholdOverrides,
}
