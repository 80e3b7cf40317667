use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Calculator {
    Hedge,
    LockIn,
    Wheel,
}

impl Calculator {
    pub const ALL: [Calculator; 3] = [Calculator::Hedge, Calculator::LockIn, Calculator::Wheel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Calculator::Hedge => "hedge",
            Calculator::LockIn => "lock_in",
            Calculator::Wheel => "wheel",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PositionConfig {
    /// Ticker label; display only.
    #[serde(default)]
    pub symbol: Option<String>,
    pub shares: u32,
    pub purchase_price: f64,
    pub current_price: f64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            symbol: None,
            shares: 300,
            purchase_price: 46.01,
            current_price: 42.80,
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

/// One option line as entered on the form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub strike: f64,
    /// Premium per share.
    pub premium: f64,
    #[serde(default)]
    pub days: u32,
    /// When set, replaces `days` with the calendar days from `as_of`.
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

impl LegConfig {
    pub fn new(enabled: bool, strike: f64, premium: f64, days: u32) -> Self {
        Self {
            enabled,
            strike,
            premium,
            days,
            expires_on: None,
        }
    }
}

fn default_hedge_put() -> LegConfig {
    LegConfig::new(true, 46.0, 6.70, 45)
}

fn default_hedge_call() -> LegConfig {
    LegConfig::new(false, 50.0, 2.00, 45)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HedgeConfig {
    #[serde(default = "default_hedge_put")]
    pub put: LegConfig,
    #[serde(default = "default_hedge_call")]
    pub call: LegConfig,
    /// Spot for the adjustable scenario; defaults to the current price.
    #[serde(default)]
    pub custom_spot: Option<f64>,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            put: default_hedge_put(),
            call: default_hedge_call(),
            custom_spot: None,
        }
    }
}

/// Quoted premiums for one lock-in strike, replacing the built-in estimate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PremiumOverride {
    pub strike: f64,
    pub put_premium: f64,
    pub call_premium: f64,
}

fn default_lock_in_days() -> u32 {
    45
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LockInConfig {
    #[serde(default = "default_lock_in_days")]
    pub days: u32,
    /// Candidate strikes; derived from the position when absent.
    #[serde(default)]
    pub strikes: Option<Vec<f64>>,
    #[serde(default)]
    pub selected_strike: Option<f64>,
    #[serde(default)]
    pub premiums: Vec<PremiumOverride>,
}

impl Default for LockInConfig {
    fn default() -> Self {
        Self {
            days: default_lock_in_days(),
            strikes: None,
            selected_strike: None,
            premiums: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoveredCallConfig {
    pub strike: f64,
    pub premium: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Spot after the short put was assigned.
    pub spot_after_assignment: f64,
    /// Current per-share value of the long put still held.
    pub long_put_value: f64,
    pub new_put_premium: f64,
    pub new_put_days: u32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            spot_after_assignment: 43.00,
            long_put_value: 4.50,
            new_put_premium: 2.50,
            new_put_days: 10,
        }
    }
}

fn default_wheel_short_put() -> LegConfig {
    LegConfig::new(true, 47.0, 3.20, 9)
}

fn default_wheel_long_put() -> LegConfig {
    LegConfig::new(true, 47.0, 4.50, 44)
}

fn default_wheel_call() -> CoveredCallConfig {
    CoveredCallConfig {
        strike: 48.0,
        premium: 2.10,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WheelConfig {
    pub symbol: String,
    pub current_stock_price: f64,
    /// Each contract covers 100 shares.
    pub contracts: u32,
    #[serde(default = "default_wheel_short_put")]
    pub short_put: LegConfig,
    #[serde(default = "default_wheel_long_put")]
    pub long_put: LegConfig,
    #[serde(default = "default_wheel_call")]
    pub covered_call: CoveredCallConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            symbol: "SOXL".to_string(),
            current_stock_price: 46.83,
            contracts: 1,
            short_put: default_wheel_short_put(),
            long_put: default_wheel_long_put(),
            covered_call: default_wheel_call(),
            recovery: RecoveryConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reference date for legs given by expiration date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub position: PositionConfig,
    #[serde(default)]
    pub hedge: HedgeConfig,
    #[serde(default)]
    pub lock_in: LockInConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
}

impl AppConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {path}"))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to deserialize TOML config at {path}"))?;
        Ok(cfg)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in sample inputs.
    pub fn from_file_or_default(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(
                target: "overlay",
                config = %path,
                "config file not found, using defaults"
            );
            Ok(Self::default())
        }
    }
}
