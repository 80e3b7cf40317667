use serde::Serialize;

use crate::engine::{
    break_even, cost, evaluate, valuate, BreakEven, EngineResult, LegCosting,
    NetPremiumKind, PositionValuation, ScenarioResult, StockPosition,
};
use crate::strategy::params::HedgeParams;
use crate::utils::math::format_number;

/// Offset used to place the downside scenario below the put strike (or spot).
pub const DOWNSIDE_OFFSET: f64 = 5.0;
/// Offset above purchase price for the upside scenario when no call is written.
pub const UPSIDE_OFFSET: f64 = 5.0;
/// Spot above the call strike used to show the capped maximum gain.
pub const MAX_GAIN_PROBE: f64 = 100.0;

/// One labelled row of the scenario table.
#[derive(Clone, Debug, Serialize)]
pub struct HedgeScenario {
    pub name: String,
    pub description: String,
    pub result: ScenarioResult,
}

#[derive(Clone, Debug, Serialize)]
pub struct KeyInsights {
    pub protected_floor: Option<f64>,
    pub upside_cap: Option<f64>,
    /// P&L if the stock goes to zero.
    pub max_loss: f64,
    /// P&L once the call cap binds; only when a call is written.
    pub max_gain: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HedgeReport {
    pub position: StockPosition,
    pub valuation: PositionValuation,
    pub costing: LegCosting,
    pub net_premium_kind: NetPremiumKind,
    pub break_even: BreakEven,
    /// Break-even minus purchase price.
    pub break_even_shift: f64,
    pub scenarios: Vec<HedgeScenario>,
    pub custom: ScenarioResult,
    /// Upper end of the adjustable-spot range.
    pub spot_range_max: f64,
    pub insights: KeyInsights,
    /// Put strike above call strike; floor and cap each test the raw spot.
    pub inverted_collar: bool,
}

/// Run the protective-put / covered-call calculator.
pub fn analyze(params: &HedgeParams) -> EngineResult<HedgeReport> {
    let position = &params.position;
    let legs = params.legs();

    let valuation = valuate(position);
    let costing = cost(&legs, position.shares);
    let be = break_even(position, costing.net_premium_cash_flow)?;

    let put_on = params.put.enabled;
    let call_on = params.call.enabled;

    let rows = [
        (
            "Stock drops below put strike",
            if put_on {
                params.put.strike - DOWNSIDE_OFFSET
            } else {
                position.current_price - DOWNSIDE_OFFSET
            },
            if put_on {
                format!("Protected at ${}", format_number(params.put.strike, 2))
            } else {
                "No protection".to_string()
            },
        ),
        (
            "Stock at current price",
            position.current_price,
            "Current market price".to_string(),
        ),
        (
            "Stock at break-even",
            be.break_even_price,
            "Break-even point".to_string(),
        ),
        (
            "Stock at call strike",
            if call_on {
                params.call.strike
            } else {
                position.purchase_price + UPSIDE_OFFSET
            },
            if call_on {
                format!("Capped at ${}", format_number(params.call.strike, 2))
            } else {
                "No cap".to_string()
            },
        ),
    ];

    let scenarios = rows
        .into_iter()
        .map(|(name, spot, description)| HedgeScenario {
            name: name.to_string(),
            description,
            result: evaluate(position, &legs, &costing, spot),
        })
        .collect();

    let custom = evaluate(position, &legs, &costing, params.custom_spot);

    let insights = KeyInsights {
        protected_floor: put_on.then_some(params.put.strike),
        upside_cap: call_on.then_some(params.call.strike),
        max_loss: evaluate(position, &legs, &costing, 0.0).profit_loss,
        max_gain: call_on.then(|| {
            evaluate(position, &legs, &costing, params.call.strike + MAX_GAIN_PROBE).profit_loss
        }),
    };

    let doubled_purchase = position.purchase_price * 2.0;
    let spot_range_max = if call_on {
        doubled_purchase.max(params.call.strike * 1.5)
    } else {
        doubled_purchase
    };

    let inverted_collar = legs.has_inverted_collar();
    if inverted_collar {
        tracing::warn!(
            target: "engine",
            put_strike = params.put.strike,
            call_strike = params.call.strike,
            "put strike above call strike; spots above the call strike pay out at the call strike"
        );
    }

    Ok(HedgeReport {
        position: *position,
        valuation,
        net_premium_kind: costing.kind(),
        costing,
        break_even_shift: be.shift_from_purchase(position),
        break_even: be,
        scenarios,
        custom,
        spot_range_max,
        insights,
        inverted_collar,
    })
}
