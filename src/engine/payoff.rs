use serde::Serialize;

use crate::engine::legs::{LegCosting, LegSet};
use crate::engine::position::StockPosition;
use crate::utils::math::ratio_pct;

/// Position outcome at one hypothetical expiration price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub hypothetical_spot: f64,
    /// Spot after the put floor and call cap have been applied.
    pub effective_stock_price: f64,
    pub position_value: f64,
    pub profit_loss: f64,
    /// NaN or infinite when the total cost basis is zero.
    pub profit_loss_percentage: f64,
}

impl ScenarioResult {
    pub fn is_degenerate(&self) -> bool {
        !self.profit_loss_percentage.is_finite()
    }

    pub fn is_profitable(&self) -> bool {
        self.profit_loss >= 0.0
    }
}

/// Clamp `spot` to the floors and caps in `legs`.
///
/// Both tests look at the raw spot. Floors are applied first and a cap only
/// overwrites the result when the spot itself is above the call strike, so
/// with a put strike above the call strike a low spot keeps the put floor.
pub fn effective_spot(legs: &LegSet, spot: f64) -> f64 {
    let mut effective = spot;

    for put in legs.floors() {
        if spot < put.strike {
            effective = put.strike;
        }
    }

    for call in legs.caps() {
        if spot > call.strike {
            effective = call.strike;
        }
    }

    effective
}

/// Evaluate the overlaid position at `hypothetical_spot` on expiration day.
///
/// `costing` must come from [`crate::engine::legs::cost`] on the same legs and
/// position; its net premium is folded into the cost basis.
pub fn evaluate(
    position: &StockPosition,
    legs: &LegSet,
    costing: &LegCosting,
    hypothetical_spot: f64,
) -> ScenarioResult {
    let effective = effective_spot(legs, hypothetical_spot);
    let position_value = position.share_count() * effective;
    let total_cost_basis = position.initial_investment() + costing.net_premium_cash_flow;
    let profit_loss = position_value - total_cost_basis;

    ScenarioResult {
        hypothetical_spot,
        effective_stock_price: effective,
        position_value,
        profit_loss,
        profit_loss_percentage: ratio_pct(profit_loss, total_cost_basis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::legs::{cost, OptionLeg};

    fn position() -> StockPosition {
        StockPosition::new(300, 46.01, 42.80)
    }

    fn hedge(put_on: bool, call_on: bool) -> LegSet {
        LegSet::new(vec![
            OptionLeg::long_put(46.0, 6.7, 45).with_enabled(put_on),
            OptionLeg::short_call(50.0, 2.0, 45).with_enabled(call_on),
        ])
    }

    #[test]
    fn put_floors_a_crash() {
        let legs = hedge(true, false);
        let c = cost(&legs, 300);
        let r = evaluate(&position(), &legs, &c, 0.0);
        assert_eq!(r.effective_stock_price, 46.0);
        assert!((r.position_value - 13_800.0).abs() < 1e-9);
        assert!((r.profit_loss + 2_013.0).abs() < 1e-6);
    }

    #[test]
    fn call_caps_a_rally() {
        let legs = hedge(false, true);
        let c = cost(&legs, 300);
        let r = evaluate(&position(), &legs, &c, 80.0);
        assert_eq!(r.effective_stock_price, 50.0);
        // 15_000 - (13_803 - 600)
        assert!((r.profit_loss - 1_797.0).abs() < 1e-6);
    }

    #[test]
    fn no_legs_tracks_spot() {
        let legs = hedge(false, false);
        let c = cost(&legs, 300);
        let r = evaluate(&position(), &legs, &c, 40.0);
        assert_eq!(r.effective_stock_price, 40.0);
        assert!((r.profit_loss + 1_803.0).abs() < 1e-6);
    }

    #[test]
    fn negative_spot_is_clamped_not_rejected() {
        let legs = hedge(true, false);
        assert_eq!(effective_spot(&legs, -10.0), 46.0);
        assert_eq!(effective_spot(&hedge(false, false), -10.0), -10.0);
    }

    #[test]
    fn inverted_collar_clamps_on_raw_spot() {
        let legs = LegSet::new(vec![
            OptionLeg::long_put(55.0, 1.0, 30),
            OptionLeg::short_call(50.0, 1.0, 30),
        ]);
        // Below the call strike only the floor fires.
        assert_eq!(effective_spot(&legs, 10.0), 55.0);
        assert_eq!(effective_spot(&legs, 50.0), 55.0);
        // Between the strikes both fire and the cap is applied last.
        assert_eq!(effective_spot(&legs, 52.0), 50.0);
        assert_eq!(effective_spot(&legs, 70.0), 50.0);
    }

    #[test]
    fn zero_cost_basis_gives_non_finite_percentage() {
        let position = StockPosition::new(100, 1.0, 1.0);
        let legs = LegSet::new(vec![OptionLeg::short_call(5.0, 1.0, 30)]);
        let c = cost(&legs, 100);
        let r = evaluate(&position, &legs, &c, 2.0);
        assert!((r.profit_loss - 200.0).abs() < 1e-9);
        assert!(r.is_degenerate());
    }
}
