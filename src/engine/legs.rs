use serde::{Deserialize, Serialize};

/// Whether the holder bought (long) or sold (short) the option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirection {
    Long,
    Short,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Put,
    Call,
}

/// One option contract line written against the stock position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub enabled: bool,
    pub direction: LegDirection,
    pub kind: OptionKind,
    pub strike: f64,
    /// Premium quoted per share; multiplied by the position's share count.
    pub premium_per_share: f64,
    pub days_to_expiration: u32,
}

impl OptionLeg {
    pub fn long_put(strike: f64, premium_per_share: f64, days_to_expiration: u32) -> Self {
        Self {
            enabled: true,
            direction: LegDirection::Long,
            kind: OptionKind::Put,
            strike,
            premium_per_share,
            days_to_expiration,
        }
    }

    pub fn short_put(strike: f64, premium_per_share: f64, days_to_expiration: u32) -> Self {
        Self {
            direction: LegDirection::Short,
            ..Self::long_put(strike, premium_per_share, days_to_expiration)
        }
    }

    pub fn short_call(strike: f64, premium_per_share: f64, days_to_expiration: u32) -> Self {
        Self {
            enabled: true,
            direction: LegDirection::Short,
            kind: OptionKind::Call,
            strike,
            premium_per_share,
            days_to_expiration,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enabled long put: sets a floor under the position.
    pub fn is_floor(&self) -> bool {
        self.enabled && self.direction == LegDirection::Long && self.kind == OptionKind::Put
    }

    /// Enabled short call: caps the position's upside.
    pub fn is_cap(&self) -> bool {
        self.enabled && self.direction == LegDirection::Short && self.kind == OptionKind::Call
    }

    /// Signed premium cash flow for `shares`: negative when paid, positive when received.
    pub fn cash_flow(&self, shares: f64) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        let magnitude = self.premium_per_share * shares;
        match self.direction {
            LegDirection::Long => -magnitude,
            LegDirection::Short => magnitude,
        }
    }
}

/// Ordered legs bound to one position for a given calculator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegSet {
    pub legs: Vec<OptionLeg>,
}

impl LegSet {
    pub fn new(legs: Vec<OptionLeg>) -> Self {
        Self { legs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionLeg> {
        self.legs.iter()
    }

    pub fn floors(&self) -> impl Iterator<Item = &OptionLeg> {
        self.legs.iter().filter(|l| l.is_floor())
    }

    pub fn caps(&self) -> impl Iterator<Item = &OptionLeg> {
        self.legs.iter().filter(|l| l.is_cap())
    }

    /// True when an enabled put floor sits above an enabled call cap.
    ///
    /// Such a collar is still evaluated: spots at or below the call strike keep
    /// the put floor, spots above it end at the call strike.
    pub fn has_inverted_collar(&self) -> bool {
        self.floors()
            .any(|put| self.caps().any(|call| put.strike > call.strike))
    }
}

/// Premium cash flow attributed to one leg.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegCashFlow {
    pub direction: LegDirection,
    pub kind: OptionKind,
    pub strike: f64,
    pub enabled: bool,
    /// Signed: negative for a debit, positive for a credit, zero when disabled.
    pub cash_flow: f64,
}

/// Result of costing a leg set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegCosting {
    /// Net premium paid across all legs (long minus short). Positive is a net
    /// debit and adds to the cost basis; negative is a net credit.
    pub net_premium_cash_flow: f64,
    pub per_leg: Vec<LegCashFlow>,
}

/// How a net premium figure reads to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NetPremiumKind {
    Cost,
    Credit,
    Neutral,
}

impl LegCosting {
    /// Signed sum of the per-leg cash flows (credit positive).
    pub fn net_cash_flow(&self) -> f64 {
        -self.net_premium_cash_flow
    }

    pub fn kind(&self) -> NetPremiumKind {
        if self.net_premium_cash_flow > 0.0 {
            NetPremiumKind::Cost
        } else if self.net_premium_cash_flow < 0.0 {
            NetPremiumKind::Credit
        } else {
            NetPremiumKind::Neutral
        }
    }

    /// Total premium paid on long legs (positive number).
    pub fn debits(&self) -> f64 {
        self.per_leg
            .iter()
            .filter(|l| l.direction == LegDirection::Long)
            .map(|l| -l.cash_flow)
            .sum()
    }

    /// Total premium received on short legs (positive number).
    pub fn credits(&self) -> f64 {
        self.per_leg
            .iter()
            .filter(|l| l.direction == LegDirection::Short)
            .map(|l| l.cash_flow)
            .sum()
    }
}

/// Cost every leg in `legs` for a position of `shares` shares.
pub fn cost(legs: &LegSet, shares: u32) -> LegCosting {
    let shares = f64::from(shares);
    let per_leg: Vec<LegCashFlow> = legs
        .iter()
        .map(|leg| LegCashFlow {
            direction: leg.direction,
            kind: leg.kind,
            strike: leg.strike,
            enabled: leg.enabled,
            cash_flow: leg.cash_flow(shares),
        })
        .collect();

    let net_cash: f64 = per_leg.iter().map(|l| l.cash_flow).sum();

    LegCosting {
        net_premium_cash_flow: -net_cash,
        per_leg,
    }
}
