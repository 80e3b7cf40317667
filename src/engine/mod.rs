pub mod breakeven;
pub mod error;
pub mod legs;
pub mod payoff;
pub mod position;

pub use breakeven::{break_even, BreakEven};
pub use error::{EngineError, EngineResult};
pub use legs::{
    cost, LegCashFlow, LegCosting, LegDirection, LegSet, NetPremiumKind, OptionKind, OptionLeg,
};
pub use payoff::{effective_spot, evaluate, ScenarioResult};
pub use position::{valuate, PositionValuation, StockPosition};
