use serde::Serialize;

/// Inputs for deciding what to do after a short put was assigned.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RecoveryInputs {
    pub short_put_strike: f64,
    pub shares_if_assigned: u32,
    /// Net premium paid for the short/long put pair (positive = debit).
    pub net_put_cost: f64,
    pub spot_after_assignment: f64,
    /// Current per-share value of the long put still held.
    pub current_long_put_value: f64,
    pub new_put_premium: f64,
    pub new_put_days_to_expiry: u32,
    /// Long put days minus short put days; may be negative.
    pub remaining_days_on_long_put: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPath {
    Exit,
    Reconfigure,
}

/// Sell the assigned shares and the long put.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExitPlan {
    pub share_proceeds: f64,
    pub long_put_sale_value: f64,
    pub proceeds: f64,
    /// Realized result including the long put's sale value.
    pub net: f64,
}

/// Sell the assigned shares, keep the long put and sell a new shorter-dated put.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReconfigurePlan {
    pub share_proceeds: f64,
    pub new_put_premium_income: f64,
    pub proceeds: f64,
    /// Immediate cash flow only; the retained long put is not valued.
    pub net: f64,
    /// New put expires before the long put does.
    pub valid: bool,
}

/// Both recovery paths plus the recommendation.
///
/// The two nets do not measure the same thing. Exit counts the long put's
/// sale value while Reconfigure leaves the retained put out entirely, so a
/// valuable long put biases the comparison toward Exit. The recommendation
/// compares the nets as they are.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RecoveryPlan {
    pub total_cost_basis: f64,
    pub exit: ExitPlan,
    pub reconfigure: ReconfigurePlan,
    /// Selling shares and the long put recovers the whole cost basis.
    pub exit_covers_cost: bool,
    pub recommendation: RecoveryPath,
}

/// Compare exiting against reconfiguring the wheel after assignment.
///
/// Reconfigure is recommended only when its net beats Exit and its new put
/// expires inside the long put's remaining window. An out-of-window
/// Reconfigure path is still computed and returned with `valid = false`.
pub fn decide(inputs: &RecoveryInputs) -> RecoveryPlan {
    let shares = f64::from(inputs.shares_if_assigned);
    let total_cost_basis = inputs.short_put_strike * shares + inputs.net_put_cost;

    let share_proceeds = inputs.spot_after_assignment * shares;

    let long_put_sale_value = inputs.current_long_put_value * shares;
    let exit_proceeds = share_proceeds + long_put_sale_value;
    let exit = ExitPlan {
        share_proceeds,
        long_put_sale_value,
        proceeds: exit_proceeds,
        net: exit_proceeds - total_cost_basis,
    };

    let new_put_premium_income = inputs.new_put_premium * shares;
    let reconfigure_proceeds = share_proceeds + new_put_premium_income;
    let reconfigure = ReconfigurePlan {
        share_proceeds,
        new_put_premium_income,
        proceeds: reconfigure_proceeds,
        net: reconfigure_proceeds - total_cost_basis,
        valid: i64::from(inputs.new_put_days_to_expiry) < inputs.remaining_days_on_long_put,
    };

    let recommendation = if reconfigure.net > exit.net && reconfigure.valid {
        RecoveryPath::Reconfigure
    } else {
        RecoveryPath::Exit
    };

    RecoveryPlan {
        total_cost_basis,
        exit,
        reconfigure,
        exit_covers_cost: exit.net >= 0.0,
        recommendation,
    }
}
