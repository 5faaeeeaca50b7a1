use clap::Args;
use seomon_alert::ThresholdConfig;
use seomon_common::i18n::normalize_locale;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "seomon.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Locale for alert messages and report labels (`en` or `zh-CN`).
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Seconds between evaluations in `watch` mode.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            refresh_secs: default_refresh_secs(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_refresh_secs() -> u64 {
    5
}

impl AppConfig {
    /// Locale to render in: `requested` when given, else the configured one,
    /// normalised to a supported locale.
    pub fn locale_for(&self, requested: Option<&str>) -> String {
        normalize_locale(requested.unwrap_or(&self.locale)).to_string()
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Loads `path` when given. Without a path, falls back to
    /// [`DEFAULT_CONFIG_PATH`] if it exists and to built-in defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Command-line threshold overrides, applied on top of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdOverrides {
    /// Alert when the latest traffic is below this many visitors
    #[arg(long)]
    pub traffic_floor: Option<f64>,
    /// Alert when the latest CTR (%) is below this value
    #[arg(long)]
    pub ctr_floor: Option<f64>,
    /// Alert when the latest keyword rank is above this position
    #[arg(long)]
    pub rank_ceiling: Option<u32>,
    /// Alert when traffic changes by this percentage or less (e.g. -10)
    #[arg(long, allow_negative_numbers = true)]
    pub drop_rate_ceiling: Option<f64>,
}

impl ThresholdOverrides {
    pub fn apply(&self, base: &ThresholdConfig) -> ThresholdConfig {
        ThresholdConfig {
            traffic_floor: self.traffic_floor.unwrap_or(base.traffic_floor),
            ctr_floor: self.ctr_floor.unwrap_or(base.ctr_floor),
            rank_ceiling: self.rank_ceiling.unwrap_or(base.rank_ceiling),
            drop_rate_ceiling: self.drop_rate_ceiling.unwrap_or(base.drop_rate_ceiling),
        }
    }
}
