//! Periodic re-evaluation of a dataset.
//!
//! Each tick reloads the config file and the dataset from disk and runs one
//! complete, independent evaluation. Thresholds and locale are picked up on
//! reload; `refresh_secs` is read once when the loop starts. Ticks never overlap: the evaluation
//! runs inline in the loop and missed ticks are skipped.

use crate::config::{AppConfig, ThresholdOverrides};
use crate::loader::load_records;
use crate::report;
use chrono::Local;
use seomon_alert::change::annotate;
use seomon_alert::{AlertEvaluator, Evaluation, ThresholdConfig};
use std::io::Write;
use std::path::PathBuf;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};

pub struct Watcher {
    data_path: PathBuf,
    config_path: Option<PathBuf>,
    overrides: ThresholdOverrides,
    locale_override: Option<String>,
    locale: String,
    thresholds: ThresholdConfig,
}

impl Watcher {
    /// Starts from `initial` with the command-line overrides applied. Fails
    /// if the resulting thresholds are invalid; later reloads fall back to
    /// the last valid set instead.
    pub fn new(
        data_path: PathBuf,
        config_path: Option<PathBuf>,
        overrides: ThresholdOverrides,
        locale_override: Option<String>,
        initial: &AppConfig,
    ) -> anyhow::Result<Self> {
        let thresholds = overrides.apply(&initial.thresholds);
        thresholds.validate()?;
        let locale = initial.locale_for(locale_override.as_deref());
        Ok(Self {
            data_path,
            config_path,
            overrides,
            locale_override,
            locale,
            thresholds,
        })
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Re-reads the config file. Valid thresholds and the locale are adopted;
    /// `--locale` keeps precedence over the file.
    pub fn reload_config(&mut self) {
        match AppConfig::resolve(self.config_path.as_deref()) {
            Ok(config) => {
                let candidate = self.overrides.apply(&config.thresholds);
                if candidate != self.thresholds {
                    self.thresholds = self.thresholds.replace_with(candidate);
                }
                let locale = config.locale_for(self.locale_override.as_deref());
                if locale != self.locale {
                    tracing::info!(from = %self.locale, to = %locale, "Locale changed");
                    self.locale = locale;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Config reload failed, keeping previous thresholds");
            }
        }
    }

    /// Runs one refresh cycle and returns the finished evaluation.
    pub fn tick(&mut self) -> anyhow::Result<Evaluation> {
        self.reload_config();
        let records = load_records(&self.data_path)?;
        let evaluator = AlertEvaluator::new(self.thresholds.clone())?.with_locale(&self.locale);
        Ok(evaluator.evaluate(&annotate(&records))?)
    }

    pub async fn run(mut self, every: Duration) -> anyhow::Result<()> {
        let mut tick = interval(every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            data = %self.data_path.display(),
            interval_secs = every.as_secs(),
            "Starting refresh loop"
        );

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match self.tick() {
                        Ok(evaluation) => {
                            tracing::debug!(
                                alerts = evaluation.alerts.len(),
                                status = %evaluation.status,
                                "Refresh complete"
                            );
                            self.publish(&evaluation);
                        }
                        Err(e) => tracing::error!(error = %e, "Refresh failed"),
                    }
                }
                _ = signal::ctrl_c() => {
                    tracing::info!("Shutting down gracefully");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Writes the whole rendered evaluation in a single call.
    fn publish(&self, evaluation: &Evaluation) {
        let mut output = report::render_evaluation(evaluation, &self.locale);
        output.push_str(&format!(
            "Last updated at: {}\n\n",
            Local::now().format("%H:%M:%S")
        ));

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout
            .write_all(output.as_bytes())
            .and_then(|()| stdout.flush())
        {
            tracing::warn!(error = %e, "Failed to write refresh output");
        }
    }
}
