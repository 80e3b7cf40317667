use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::EngineResult;
use crate::strategy::{
    hedge, lock_in, wheel, HedgeParams, HedgeReport, LockInParams, LockInReport, WheelParams,
    WheelReport,
};
use crate::types::{AppConfig, Calculator};

pub mod logger;
pub mod render;

/// Output of one calculator run, tagged by calculator for JSON consumers.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum Report {
    Hedge(HedgeReport),
    LockIn(LockInReport),
    Wheel(WheelReport),
}

impl Report {
    pub fn name(&self) -> &'static str {
        match self {
            Report::Hedge(_) => "hedge",
            Report::LockIn(_) => "lock_in",
            Report::Wheel(_) => "wheel",
        }
    }
}

/// Recompute every requested calculator from `cfg`.
///
/// Nothing is cached: the same config and `as_of` always give the same reports.
pub fn build(
    cfg: &AppConfig,
    calculators: &[Calculator],
    as_of: NaiveDate,
) -> EngineResult<Vec<Report>> {
    calculators
        .iter()
        .map(|calculator| {
            let report = match calculator {
                Calculator::Hedge => {
                    Report::Hedge(hedge::analyze(&HedgeParams::from_config(cfg, as_of))?)
                }
                Calculator::LockIn => Report::LockIn(lock_in::analyze(&LockInParams::from(cfg))?),
                Calculator::Wheel => {
                    Report::Wheel(wheel::analyze(&WheelParams::from_config(cfg, as_of))?)
                }
            };
            tracing::debug!(target: "engine", calculator = report.name(), "report computed");
            Ok(report)
        })
        .collect()
}
