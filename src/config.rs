use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::event_window::EventWindowConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub estimator: EventWindowConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub tickers: Vec<String>,
    #[serde(default = "default_i")]
    pub default_i: u32,
    #[serde(default = "default_step")]
    pub i_step: u32,
    #[serde(default = "default_network_days")]
    pub default_network_days: u32,
    #[serde(default = "default_step")]
    pub network_days_step: u32,
}

fn default_i() -> u32 {
    30
}

fn default_network_days() -> u32 {
    20
}

fn default_step() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// First date shown on the change chart.
    pub start: NaiveDate,
    /// Width of the shaded span drawn after each alert, in calendar days.
    pub highlight_days: i64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            highlight_days: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DataConfig {
    /// Configured tickers, trimmed, lower-cased and deduplicated in order.
    pub fn ticker_list(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.tickers {
            let t = t.trim().to_ascii_lowercase();
            if !t.is_empty() && !out.contains(&t) {
                out.push(t);
            }
        }
        out
    }
}

impl Config {
    /// Load `ALERT_LENS_CONFIG` (or `config/default.toml`) after reading `.env`.
    /// `ALERT_LENS_DATA_DIR` overrides `data.dir`.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var("ALERT_LENS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::from_path(&path)?;
        if let Ok(dir) = std::env::var("ALERT_LENS_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data.dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config =
            toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.ticker_list().is_empty() {
            bail!("data.tickers must name at least one ticker");
        }
        if self.data.i_step == 0 || self.data.network_days_step == 0 {
            bail!("data.i_step and data.network_days_step must be > 0");
        }
        if self.estimator.window_len == 0 {
            bail!("estimator.window_len must be > 0");
        }
        if self.chart.highlight_days < 0 {
            bail!("chart.highlight_days must be >= 0");
        }
        Ok(())
    }
}
