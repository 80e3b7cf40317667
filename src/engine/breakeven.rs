use serde::Serialize;

use crate::engine::error::EngineResult;
use crate::engine::position::StockPosition;

/// Blended cost basis once option premiums are folded into the stock cost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BreakEven {
    pub total_cost_basis: f64,
    /// Spot at which the overlaid position neither gains nor loses.
    pub break_even_price: f64,
}

impl BreakEven {
    /// Break-even move relative to the original purchase price (positive means higher).
    pub fn shift_from_purchase(&self, position: &StockPosition) -> f64 {
        self.break_even_price - position.purchase_price
    }
}

/// Combine stock cost and net option premium (positive = debit) into a break-even.
pub fn break_even(position: &StockPosition, net_premium_cash_flow: f64) -> EngineResult<BreakEven> {
    position.ensure_valid()?;

    let total_cost_basis = position.initial_investment() + net_premium_cash_flow;
    Ok(BreakEven {
        total_cost_basis,
        break_even_price: total_cost_basis / position.share_count(),
    })
}
