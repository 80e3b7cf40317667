use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{LegDirection, LegSet, OptionKind, OptionLeg, StockPosition};
use crate::types::{AppConfig, LegConfig, PositionConfig, RecoveryConfig};
use crate::utils::time::days_until;

/// Build an engine leg from form input, resolving an expiration date against `as_of`.
pub fn leg_from_config(
    cfg: &LegConfig,
    direction: LegDirection,
    kind: OptionKind,
    as_of: NaiveDate,
) -> OptionLeg {
    let days_to_expiration = match cfg.expires_on {
        Some(expires_on) => days_until(as_of, expires_on),
        None => cfg.days,
    };
    OptionLeg {
        enabled: cfg.enabled,
        direction,
        kind,
        strike: cfg.strike,
        premium_per_share: cfg.premium,
        days_to_expiration,
    }
}

impl From<&PositionConfig> for StockPosition {
    fn from(cfg: &PositionConfig) -> Self {
        StockPosition::new(cfg.shares, cfg.purchase_price, cfg.current_price)
    }
}

/// Inputs for the protective-put / covered-call calculator.
#[derive(Clone, Debug)]
pub struct HedgeParams {
    pub position: StockPosition,
    pub put: OptionLeg,
    pub call: OptionLeg,
    /// Spot for the user-adjustable scenario.
    pub custom_spot: f64,
}

impl HedgeParams {
    pub fn from_config(cfg: &AppConfig, as_of: NaiveDate) -> Self {
        let position = StockPosition::from(&cfg.position);
        Self {
            position,
            put: leg_from_config(&cfg.hedge.put, LegDirection::Long, OptionKind::Put, as_of),
            call: leg_from_config(&cfg.hedge.call, LegDirection::Short, OptionKind::Call, as_of),
            custom_spot: cfg.hedge.custom_spot.unwrap_or(position.current_price),
        }
    }

    pub fn legs(&self) -> LegSet {
        LegSet::new(vec![self.put.clone(), self.call.clone()])
    }
}

/// Per-share premiums for one strike of the lock-in comparison.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PremiumQuote {
    pub strike: f64,
    pub put_premium: f64,
    pub call_premium: f64,
}

/// Inputs for the lock-in (synthetic short) comparison.
#[derive(Clone, Debug)]
pub struct LockInParams {
    pub position: StockPosition,
    pub days: u32,
    /// Explicit candidate strikes; `None` derives them from the position.
    pub strikes: Option<Vec<f64>>,
    pub selected_strike: Option<f64>,
    /// Quoted premiums that replace the estimate for matching strikes.
    pub quotes: Vec<PremiumQuote>,
}

impl From<&AppConfig> for LockInParams {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            position: StockPosition::from(&cfg.position),
            days: cfg.lock_in.days,
            strikes: cfg.lock_in.strikes.clone(),
            selected_strike: cfg.lock_in.selected_strike,
            quotes: cfg
                .lock_in
                .premiums
                .iter()
                .map(|p| PremiumQuote {
                    strike: p.strike,
                    put_premium: p.put_premium,
                    call_premium: p.call_premium,
                })
                .collect(),
        }
    }
}

/// Covered call planned against assigned shares; future income only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CoveredCallPlan {
    pub strike: f64,
    pub premium_per_share: f64,
}

/// Inputs for the cash-secured-put plus protective-put wheel entry.
#[derive(Clone, Debug)]
pub struct WheelParams {
    pub symbol: String,
    pub current_stock_price: f64,
    pub contracts: u32,
    pub short_put: OptionLeg,
    pub long_put: OptionLeg,
    pub covered_call: CoveredCallPlan,
    pub recovery: RecoveryConfig,
}

impl WheelParams {
    pub fn from_config(cfg: &AppConfig, as_of: NaiveDate) -> Self {
        let wheel = &cfg.wheel;
        Self {
            symbol: wheel.symbol.clone(),
            current_stock_price: wheel.current_stock_price,
            contracts: wheel.contracts,
            short_put: leg_from_config(
                &wheel.short_put,
                LegDirection::Short,
                OptionKind::Put,
                as_of,
            ),
            long_put: leg_from_config(&wheel.long_put, LegDirection::Long, OptionKind::Put, as_of),
            covered_call: CoveredCallPlan {
                strike: wheel.covered_call.strike,
                premium_per_share: wheel.covered_call.premium,
            },
            recovery: wheel.recovery.clone(),
        }
    }
}
