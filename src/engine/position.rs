use serde::{Deserialize, Serialize};

use crate::engine::error::{EngineError, EngineResult};
use crate::utils::math::ratio_pct;

/// A single stock holding the option legs are written against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockPosition {
    pub shares: u32,
    /// Per-share price paid for the shares.
    pub purchase_price: f64,
    /// Latest per-share market price.
    pub current_price: f64,
}

impl StockPosition {
    pub fn new(shares: u32, purchase_price: f64, current_price: f64) -> Self {
        Self {
            shares,
            purchase_price,
            current_price,
        }
    }

    /// Share count as a float for cash-flow arithmetic.
    pub fn share_count(&self) -> f64 {
        f64::from(self.shares)
    }

    pub fn initial_investment(&self) -> f64 {
        self.share_count() * self.purchase_price
    }

    pub fn current_value(&self) -> f64 {
        self.share_count() * self.current_price
    }

    /// Reject positions that would make per-share figures divide by zero.
    pub fn ensure_valid(&self) -> EngineResult<()> {
        if self.shares == 0 {
            return Err(EngineError::InvalidPosition {
                shares: self.shares,
            });
        }
        Ok(())
    }
}

/// Mark-to-market view of a position before any option overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PositionValuation {
    pub initial_investment: f64,
    pub current_value: f64,
    pub unrealized_pl: f64,
    /// NaN or infinite when the initial investment is zero.
    pub unrealized_pl_percent: f64,
}

impl PositionValuation {
    pub fn is_degenerate(&self) -> bool {
        !self.unrealized_pl_percent.is_finite()
    }
}

/// Value a stock position at its current price.
///
/// Never fails: zero or negative prices flow through the arithmetic and a zero
/// initial investment shows up as a non-finite percentage.
pub fn valuate(position: &StockPosition) -> PositionValuation {
    let initial_investment = position.initial_investment();
    let current_value = position.current_value();
    let unrealized_pl = current_value - initial_investment;

    PositionValuation {
        initial_investment,
        current_value,
        unrealized_pl,
        unrealized_pl_percent: ratio_pct(unrealized_pl, initial_investment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuate_losing_position() {
        let v = valuate(&StockPosition::new(300, 46.01, 42.80));
        assert!((v.initial_investment - 13_803.0).abs() < 1e-9);
        assert!((v.current_value - 12_840.0).abs() < 1e-9);
        assert!((v.unrealized_pl + 963.0).abs() < 1e-9);
        assert!((v.unrealized_pl_percent + 6.976744).abs() < 1e-5);
    }

    #[test]
    fn zero_purchase_price_gives_non_finite_percent() {
        let v = valuate(&StockPosition::new(100, 0.0, 10.0));
        assert_eq!(v.initial_investment, 0.0);
        assert!((v.unrealized_pl - 1_000.0).abs() < 1e-9);
        assert!(v.unrealized_pl_percent.is_infinite());
        assert!(v.is_degenerate());
    }

    #[test]
    fn zero_shares_is_rejected_only_by_validation() {
        let position = StockPosition::new(0, 10.0, 12.0);
        let v = valuate(&position);
        assert!(v.unrealized_pl_percent.is_nan());
        assert_eq!(
            position.ensure_valid(),
            Err(EngineError::InvalidPosition { shares: 0 })
        );
    }

    #[test]
    fn negative_prices_propagate() {
        let v = valuate(&StockPosition::new(10, -5.0, 5.0));
        assert!((v.initial_investment + 50.0).abs() < 1e-9);
        assert!((v.unrealized_pl - 100.0).abs() < 1e-9);
        assert!((v.unrealized_pl_percent + 200.0).abs() < 1e-9);
    }
}
