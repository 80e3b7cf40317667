use serde::Serialize;

use crate::engine::{
    break_even, cost, evaluate, valuate, EngineResult, LegSet, OptionLeg, PositionValuation,
    StockPosition,
};
use crate::strategy::params::{LockInParams, PremiumQuote};
use crate::utils::math::ratio_pct;
use crate::utils::time::year_fraction;

/// Time value, per share per year, added on top of intrinsic value by the estimate.
pub const TIME_VALUE_PER_YEAR: f64 = 2.0;

/// Rough premium placeholder: intrinsic value plus a linear time value.
///
/// This is not a pricing model; it only gives the comparison something to
/// show when no quotes are supplied.
pub fn estimate_premiums(strike: f64, spot: f64, days: u32) -> PremiumQuote {
    let time_value = year_fraction(days) * TIME_VALUE_PER_YEAR;
    PremiumQuote {
        strike,
        put_premium: (strike - spot).max(0.0) + time_value,
        call_premium: (spot - strike).max(0.0) + time_value,
    }
}

/// Default strikes to compare: two around the current price, three around the purchase price.
///
/// Adjacent duplicates are collapsed.
pub fn candidate_strikes(position: &StockPosition) -> Vec<f64> {
    let mut strikes = vec![
        (position.current_price - 2.0).floor(),
        position.current_price.floor(),
        (position.purchase_price - 1.0).ceil(),
        position.purchase_price.ceil(),
        (position.purchase_price + 1.0).ceil(),
    ];
    strikes.dedup();
    strikes
}

/// Strike selected when none is configured.
pub fn default_selected_strike(position: &StockPosition) -> f64 {
    (position.purchase_price - 1.0).ceil()
}

/// Outcome of locking the exit at one strike with a long put plus short call.
#[derive(Clone, Debug, Serialize)]
pub struct LockInRow {
    pub strike: f64,
    pub put_premium: f64,
    pub call_premium: f64,
    pub put_cost: f64,
    pub call_credit: f64,
    /// Put cost minus call credit; negative is a net credit.
    pub net_cost: f64,
    pub exit_value: f64,
    pub total_cost: f64,
    /// Exit value minus total cost.
    pub net_result: f64,
    /// Net result relative to the stock's initial investment.
    pub loss_percentage: f64,
    pub at_or_above_purchase: bool,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LockInReport {
    pub position: StockPosition,
    pub valuation: PositionValuation,
    pub days: u32,
    pub rows: Vec<LockInRow>,
    pub selected: LockInRow,
}

fn quote_for(params: &LockInParams, strike: f64) -> PremiumQuote {
    params
        .quotes
        .iter()
        .find(|q| (q.strike - strike).abs() < 1e-9)
        .copied()
        .unwrap_or_else(|| estimate_premiums(strike, params.position.current_price, params.days))
}

/// Value a synthetic short at `quote.strike` against `position`.
///
/// Long put and short call at the same strike pin every expiration spot to
/// the strike, so the exit value is the strike times shares.
pub fn lock_in_at(
    position: &StockPosition,
    quote: &PremiumQuote,
    days: u32,
) -> EngineResult<LockInRow> {
    let legs = LegSet::new(vec![
        OptionLeg::long_put(quote.strike, quote.put_premium, days),
        OptionLeg::short_call(quote.strike, quote.call_premium, days),
    ]);
    let costing = cost(&legs, position.shares);
    let be = break_even(position, costing.net_premium_cash_flow)?;
    let outcome = evaluate(position, &legs, &costing, position.current_price);

    Ok(LockInRow {
        strike: quote.strike,
        put_premium: quote.put_premium,
        call_premium: quote.call_premium,
        put_cost: costing.debits(),
        call_credit: costing.credits(),
        net_cost: costing.net_premium_cash_flow,
        exit_value: outcome.position_value,
        total_cost: be.total_cost_basis,
        net_result: outcome.profit_loss,
        loss_percentage: ratio_pct(outcome.profit_loss, position.initial_investment()),
        at_or_above_purchase: quote.strike >= position.purchase_price,
        selected: false,
    })
}

/// Compare lock-in exits across candidate strikes.
pub fn analyze(params: &LockInParams) -> EngineResult<LockInReport> {
    let position = &params.position;
    let strikes = params
        .strikes
        .clone()
        .unwrap_or_else(|| candidate_strikes(position));
    let selected_strike = params
        .selected_strike
        .unwrap_or_else(|| default_selected_strike(position));

    let mut rows = Vec::with_capacity(strikes.len());
    for strike in strikes {
        let mut row = lock_in_at(position, &quote_for(params, strike), params.days)?;
        row.selected = (strike - selected_strike).abs() < 1e-9;
        rows.push(row);
    }

    let selected = match rows.iter().find(|r| r.selected) {
        Some(row) => row.clone(),
        None => {
            let mut row = lock_in_at(position, &quote_for(params, selected_strike), params.days)?;
            row.selected = true;
            row
        }
    };

    Ok(LockInReport {
        position: *position,
        valuation: valuate(position),
        days: params.days,
        rows,
        selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> StockPosition {
        StockPosition::new(300, 46.01, 42.80)
    }

    fn params() -> LockInParams {
        LockInParams {
            position: position(),
            days: 45,
            strikes: None,
            selected_strike: None,
            quotes: Vec::new(),
        }
    }

    #[test]
    fn test_candidate_strikes() {
        assert_eq!(candidate_strikes(&position()), vec![40.0, 42.0, 46.0, 47.0, 48.0]);
        assert_eq!(default_selected_strike(&position()), 46.0);
    }

    #[test]
    fn test_estimate_premiums() {
        let q = estimate_premiums(46.0, 42.80, 365);
        assert!((q.put_premium - 5.2).abs() < 1e-9);
        assert!((q.call_premium - 2.0).abs() < 1e-9);
    }

    #[test]
    fn lock_in_row_matches_hand_calculation() {
        let quote = PremiumQuote {
            strike: 46.0,
            put_premium: 4.0,
            call_premium: 1.0,
        };
        let row = lock_in_at(&position(), &quote, 45).unwrap();
        assert!((row.put_cost - 1_200.0).abs() < 1e-9);
        assert!((row.call_credit - 300.0).abs() < 1e-9);
        assert!((row.net_cost - 900.0).abs() < 1e-9);
        assert!((row.exit_value - 13_800.0).abs() < 1e-9);
        assert!((row.total_cost - 14_703.0).abs() < 1e-6);
        assert!((row.net_result + 903.0).abs() < 1e-6);
        assert!((row.loss_percentage - (-903.0 / 13_803.0 * 100.0)).abs() < 1e-9);
        assert!(!row.at_or_above_purchase);
    }

    #[test]
    fn analyze_marks_default_selection() {
        let report = analyze(&params()).unwrap();
        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.rows.iter().filter(|r| r.selected).count(), 1);
        assert_eq!(report.selected.strike, 46.0);
        assert!(report.rows[3].at_or_above_purchase);
    }

    #[test]
    fn quotes_override_estimate() {
        let mut p = params();
        p.quotes.push(PremiumQuote {
            strike: 47.0,
            put_premium: 5.5,
            call_premium: 0.5,
        });
        let report = analyze(&p).unwrap();
        let row = report.rows.iter().find(|r| r.strike == 47.0).unwrap();
        assert_eq!(row.put_premium, 5.5);
        assert!((row.net_cost - 1_500.0).abs() < 1e-9);
    }

    #[test]
    fn selection_outside_candidates_is_still_computed() {
        let mut p = params();
        p.selected_strike = Some(44.0);
        let report = analyze(&p).unwrap();
        assert!(report.rows.iter().all(|r| !r.selected));
        assert_eq!(report.selected.strike, 44.0);
        assert!(report.selected.selected);
    }
}
