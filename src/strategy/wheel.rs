use serde::Serialize;

use crate::engine::{
    break_even, cost, EngineError, EngineResult, LegCosting, LegSet, StockPosition,
};
use crate::strategy::params::{CoveredCallPlan, WheelParams};
use crate::strategy::recovery::{decide, RecoveryInputs, RecoveryPlan};
use crate::utils::math::ratio_pct;
use crate::utils::time::days_remaining_after;

/// Shares delivered per option contract.
pub const CONTRACT_MULTIPLIER: u32 = 100;

/// Price drops from the current price shown in the downside table.
pub const DROP_STEPS: [f64; 3] = [0.10, 0.20, 0.30];

pub fn shares_for_contracts(contracts: u32) -> EngineResult<u32> {
    if contracts == 0 {
        return Err(EngineError::InvalidContracts(
            "at least one contract is required".to_string(),
        ));
    }
    contracts.checked_mul(CONTRACT_MULTIPLIER).ok_or_else(|| {
        EngineError::InvalidContracts(format!("{contracts} contracts overflow the share count"))
    })
}

/// Capital picture of the short-put / long-put entry if the short put is assigned.
#[derive(Clone, Debug, Serialize)]
pub struct WheelEntry {
    pub shares_if_assigned: u32,
    pub short_put_credit: f64,
    pub long_put_cost: f64,
    /// Long put cost minus short put credit.
    pub net_put_cost: f64,
    pub cost_basis_if_assigned: f64,
    pub total_capital_required: f64,
    pub effective_cost_per_share: f64,
    /// Premium debit still to be recovered.
    pub shortfall: f64,
    pub days_remaining_on_long_put: i64,
}

/// Income from writing covered calls on assigned shares. Not part of the put netting.
#[derive(Clone, Debug, Serialize)]
pub struct CoveredCallOutlook {
    pub plan: CoveredCallPlan,
    pub premium_income: f64,
    pub capital_gain_if_called_away: f64,
    pub total_profit_if_called_away: f64,
    /// Call cycles needed to recover the shortfall from premium alone.
    pub calls_needed_for_premium_only: f64,
    pub breaks_even_in_one_cycle: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExpiresWorthless {
    pub net_pl: f64,
    pub roi_on_long_put: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct AssignedOutlook {
    pub long_put_value_if_exercised: f64,
    pub max_loss: f64,
    pub break_even_stock_price: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DropScenario {
    pub drop_fraction: f64,
    pub stock_price: f64,
    pub loss_on_shares: f64,
    pub protection: f64,
    pub net_loss: f64,
    /// Net loss does not exceed the premium debit already paid.
    pub within_net_debit: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct DownsideOutlook {
    pub drops: Vec<DropScenario>,
    pub max_protected_loss: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct WheelReport {
    pub symbol: String,
    pub current_stock_price: f64,
    pub contracts: u32,
    pub costing: LegCosting,
    pub entry: WheelEntry,
    pub covered_call: CoveredCallOutlook,
    pub expires_worthless: ExpiresWorthless,
    pub assigned: AssignedOutlook,
    pub downside: DownsideOutlook,
    pub recovery: RecoveryPlan,
}

/// Loss after assignment at `stock_price`, with the long put limiting the
/// share loss once the price is below its strike.
pub fn net_loss_at(
    stock_price: f64,
    short_put_strike: f64,
    long_put_strike: f64,
    shares: f64,
    net_put_cost: f64,
) -> f64 {
    let exit_price = if stock_price >= long_put_strike {
        stock_price
    } else {
        long_put_strike
    };
    let loss_on_shares = (short_put_strike - exit_price) * shares;
    net_put_cost + loss_on_shares.max(0.0)
}

fn covered_call_outlook(plan: CoveredCallPlan, entry: &WheelEntry) -> CoveredCallOutlook {
    let shares = f64::from(entry.shares_if_assigned);
    let premium_income = plan.premium_per_share * shares;
    let capital_gain_if_called_away = (plan.strike - entry.effective_cost_per_share) * shares;
    let total_profit_if_called_away = premium_income + capital_gain_if_called_away;

    CoveredCallOutlook {
        plan,
        premium_income,
        capital_gain_if_called_away,
        total_profit_if_called_away,
        calls_needed_for_premium_only: (entry.shortfall / premium_income).ceil(),
        breaks_even_in_one_cycle: total_profit_if_called_away >= entry.shortfall,
    }
}

fn downside_outlook(params: &WheelParams, entry: &WheelEntry) -> DownsideOutlook {
    let shares = f64::from(entry.shares_if_assigned);
    let short_strike = params.short_put.strike;
    let long_strike = params.long_put.strike;

    let drops = DROP_STEPS
        .iter()
        .map(|&drop_fraction| {
            let stock_price = params.current_stock_price * (1.0 - drop_fraction);
            let net_loss = net_loss_at(
                stock_price,
                short_strike,
                long_strike,
                shares,
                entry.net_put_cost,
            );
            DropScenario {
                drop_fraction,
                stock_price,
                loss_on_shares: (short_strike - stock_price) * shares,
                protection: ((long_strike - stock_price) * shares).max(0.0),
                net_loss,
                within_net_debit: net_loss <= entry.net_put_cost,
            }
        })
        .collect();

    DownsideOutlook {
        drops,
        max_protected_loss: entry.net_put_cost.max(0.0),
    }
}

/// Plan a wheel entry: sell a cash-secured put, buy a longer-dated protective
/// put, and work out what happens if the short put is assigned.
pub fn analyze(params: &WheelParams) -> EngineResult<WheelReport> {
    let shares_if_assigned = shares_for_contracts(params.contracts)?;
    let shares = f64::from(shares_if_assigned);

    let legs = LegSet::new(vec![params.short_put.clone(), params.long_put.clone()]);
    let costing = cost(&legs, shares_if_assigned);
    let net_put_cost = costing.net_premium_cash_flow;

    let assigned_position = StockPosition::new(
        shares_if_assigned,
        params.short_put.strike,
        params.current_stock_price,
    );
    let be = break_even(&assigned_position, net_put_cost)?;
    let days_remaining_on_long_put = days_remaining_after(
        params.long_put.days_to_expiration,
        params.short_put.days_to_expiration,
    );

    let entry = WheelEntry {
        shares_if_assigned,
        short_put_credit: costing.credits(),
        long_put_cost: costing.debits(),
        net_put_cost,
        cost_basis_if_assigned: assigned_position.initial_investment(),
        total_capital_required: be.total_cost_basis,
        effective_cost_per_share: be.break_even_price,
        shortfall: net_put_cost,
        days_remaining_on_long_put,
    };

    let expires_worthless_pl = entry.short_put_credit - entry.long_put_cost;
    let expires_worthless = ExpiresWorthless {
        net_pl: expires_worthless_pl,
        roi_on_long_put: ratio_pct(expires_worthless_pl, entry.long_put_cost),
    };

    let long_put_value_if_exercised = (params.long_put.strike - params.short_put.strike) * shares;
    let assigned = AssignedOutlook {
        long_put_value_if_exercised,
        max_loss: net_put_cost - long_put_value_if_exercised,
        break_even_stock_price: entry.effective_cost_per_share,
    };

    let recovery = decide(&RecoveryInputs {
        short_put_strike: params.short_put.strike,
        shares_if_assigned,
        net_put_cost,
        spot_after_assignment: params.recovery.spot_after_assignment,
        current_long_put_value: params.recovery.long_put_value,
        new_put_premium: params.recovery.new_put_premium,
        new_put_days_to_expiry: params.recovery.new_put_days,
        remaining_days_on_long_put: days_remaining_on_long_put,
    });

    if !recovery.reconfigure.valid {
        tracing::warn!(
            target: "engine",
            new_put_days = params.recovery.new_put_days,
            remaining_days = days_remaining_on_long_put,
            "new put does not expire before the long put; reconfigure path is informational only"
        );
    }

    Ok(WheelReport {
        symbol: params.symbol.clone(),
        current_stock_price: params.current_stock_price,
        contracts: params.contracts,
        covered_call: covered_call_outlook(params.covered_call, &entry),
        downside: downside_outlook(params, &entry),
        costing,
        entry,
        expires_worthless,
        assigned,
        recovery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OptionLeg;
    use crate::strategy::recovery::RecoveryPath;
    use crate::types::RecoveryConfig;

    fn params() -> WheelParams {
        WheelParams {
            symbol: "SOXL".to_string(),
            current_stock_price: 46.83,
            contracts: 1,
            short_put: OptionLeg::short_put(47.0, 3.20, 9),
            long_put: OptionLeg::long_put(47.0, 4.50, 44),
            covered_call: CoveredCallPlan {
                strike: 48.0,
                premium_per_share: 2.10,
            },
            recovery: RecoveryConfig::default(),
        }
    }

    #[test]
    fn test_shares_for_contracts() {
        assert_eq!(shares_for_contracts(3).unwrap(), 300);
        assert!(shares_for_contracts(0).is_err());
        assert!(shares_for_contracts(u32::MAX).is_err());
    }

    #[test]
    fn entry_figures_for_sample_wheel() {
        let report = analyze(&params()).unwrap();
        let e = &report.entry;
        assert_eq!(e.shares_if_assigned, 100);
        assert!((e.short_put_credit - 320.0).abs() < 1e-9);
        assert!((e.long_put_cost - 450.0).abs() < 1e-9);
        assert!((e.net_put_cost - 130.0).abs() < 1e-9);
        assert!((e.cost_basis_if_assigned - 4_700.0).abs() < 1e-9);
        assert!((e.total_capital_required - 4_830.0).abs() < 1e-9);
        assert!((e.effective_cost_per_share - 48.30).abs() < 1e-9);
        assert_eq!(e.days_remaining_on_long_put, 35);
    }

    #[test]
    fn covered_call_plan_is_separate_income() {
        let report = analyze(&params()).unwrap();
        let cc = &report.covered_call;
        assert!((cc.premium_income - 210.0).abs() < 1e-9);
        assert!((cc.capital_gain_if_called_away + 30.0).abs() < 1e-9);
        assert!((cc.total_profit_if_called_away - 180.0).abs() < 1e-9);
        assert_eq!(cc.calls_needed_for_premium_only, 1.0);
        assert!(cc.breaks_even_in_one_cycle);
        // The call never enters the put netting.
        assert_eq!(report.costing.per_leg.len(), 2);
    }

    #[test]
    fn scenario_outlooks() {
        let report = analyze(&params()).unwrap();
        assert!((report.expires_worthless.net_pl + 130.0).abs() < 1e-9);
        assert!((report.expires_worthless.roi_on_long_put + 28.888_888).abs() < 1e-5);
        assert_eq!(report.assigned.long_put_value_if_exercised, 0.0);
        assert!((report.assigned.max_loss - 130.0).abs() < 1e-9);

        let drops = &report.downside.drops;
        assert_eq!(drops.len(), 3);
        assert!((drops[0].stock_price - 42.147).abs() < 1e-9);
        // Below the long put strike the share loss is limited to strike spread (zero here).
        assert!((drops[0].net_loss - 130.0).abs() < 1e-9);
        assert!(drops.iter().all(|d| d.within_net_debit));
        assert!((drops[2].protection - (47.0 - 46.83 * 0.7) * 100.0).abs() < 1e-9);
        assert!((report.downside.max_protected_loss - 130.0).abs() < 1e-9);
    }

    #[test]
    fn recovery_uses_entry_cost() {
        let report = analyze(&params()).unwrap();
        assert!((report.recovery.total_cost_basis - 4_830.0).abs() < 1e-9);
        assert!((report.recovery.exit.net + 80.0).abs() < 1e-9);
        assert_eq!(report.recovery.recommendation, RecoveryPath::Exit);
    }

    #[test]
    fn net_loss_above_long_strike_counts_share_loss() {
        let loss = net_loss_at(45.0, 47.0, 44.0, 100.0, 130.0);
        assert!((loss - 330.0).abs() < 1e-9);
        let capped = net_loss_at(30.0, 47.0, 44.0, 100.0, 130.0);
        assert!((capped - 430.0).abs() < 1e-9);
    }
}
