use std::fmt;

use crate::engine::{NetPremiumKind, PositionValuation, ScenarioResult};
use crate::report::Report;
use crate::strategy::{HedgeReport, LockInReport, RecoveryPath, WheelReport};
use crate::utils::math::{format_currency, format_number, format_pct, format_signed_currency};

fn write_valuation(f: &mut fmt::Formatter<'_>, v: &PositionValuation) -> fmt::Result {
    writeln!(f, "  initial investment   {}", format_currency(v.initial_investment))?;
    writeln!(f, "  current value        {}", format_currency(v.current_value))?;
    writeln!(
        f,
        "  unrealized P&L       {} ({})",
        format_signed_currency(v.unrealized_pl),
        format_pct(v.unrealized_pl_percent)
    )
}

fn write_scenario(f: &mut fmt::Formatter<'_>, label: &str, r: &ScenarioResult) -> fmt::Result {
    writeln!(
        f,
        "  {:<30} spot {:>10}  value {:>12}  P&L {:>12} ({})",
        label,
        format_currency(r.hypothetical_spot),
        format_currency(r.position_value),
        format_signed_currency(r.profit_loss),
        format_pct(r.profit_loss_percentage)
    )
}

impl fmt::Display for HedgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hedge: {} shares @ {}",
            self.position.shares,
            format_currency(self.position.purchase_price)
        )?;
        write_valuation(f, &self.valuation)?;

        let label = match self.net_premium_kind {
            NetPremiumKind::Cost => "Cost",
            NetPremiumKind::Credit => "Credit",
            NetPremiumKind::Neutral => "Neutral",
        };
        writeln!(
            f,
            "  net option premium   {} {}",
            format_currency(self.costing.net_premium_cash_flow.abs()),
            label
        )?;
        writeln!(
            f,
            "  total cost basis     {}",
            format_currency(self.break_even.total_cost_basis)
        )?;
        writeln!(
            f,
            "  break-even           {} ({} vs purchase)",
            format_currency(self.break_even.break_even_price),
            format_signed_currency(self.break_even_shift)
        )?;

        writeln!(f, "Scenarios:")?;
        for s in &self.scenarios {
            write_scenario(f, &s.name, &s.result)?;
        }
        write_scenario(f, "Custom", &self.custom)?;

        writeln!(f, "Key insights:")?;
        if let Some(floor) = self.insights.protected_floor {
            writeln!(f, "  - protected at {} with a put option", format_currency(floor))?;
        }
        if let Some(cap) = self.insights.upside_cap {
            writeln!(f, "  - upside capped at {} with a covered call", format_currency(cap))?;
        }
        writeln!(
            f,
            "  - maximum loss {} (if stock goes to $0)",
            format_signed_currency(self.insights.max_loss)
        )?;
        if let Some(gain) = self.insights.max_gain {
            writeln!(f, "  - maximum gain {}", format_signed_currency(gain))?;
        }
        if self.inverted_collar {
            writeln!(f, "  - warning: put strike is above call strike")?;
        }
        Ok(())
    }
}

impl fmt::Display for LockInReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lock-in: {} shares, {} days to expiration", self.position.shares, self.days)?;
        write_valuation(f, &self.valuation)?;
        writeln!(f, "Exit points:")?;
        for row in &self.rows {
            writeln!(
                f,
                "  {} strike {:>10}  net cost {:>12}  exit {:>12}  result {:>12} ({}){}",
                if row.selected { "*" } else { " " },
                format_currency(row.strike),
                format_signed_currency(-row.net_cost),
                format_currency(row.exit_value),
                format_signed_currency(row.net_result),
                format_pct(row.loss_percentage),
                if row.at_or_above_purchase { "  at/above purchase" } else { "" }
            )?;
        }
        writeln!(
            f,
            "Selected {}: put {} / call {} per share, total cost {}",
            format_currency(self.selected.strike),
            format_number(self.selected.put_premium, 2),
            format_number(self.selected.call_premium, 2),
            format_currency(self.selected.total_cost)
        )
    }
}

impl fmt::Display for WheelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.entry;
        writeln!(
            f,
            "Wheel: {} @ {}, {} contract(s) = {} shares if assigned",
            self.symbol,
            format_currency(self.current_stock_price),
            self.contracts,
            e.shares_if_assigned
        )?;
        writeln!(f, "  short put credit     {}", format_currency(e.short_put_credit))?;
        writeln!(f, "  long put cost        {}", format_currency(e.long_put_cost))?;
        writeln!(f, "  net put cost         {}", format_currency(e.net_put_cost))?;
        writeln!(f, "  capital required     {}", format_currency(e.total_capital_required))?;
        writeln!(f, "  effective cost/share {}", format_currency(e.effective_cost_per_share))?;
        writeln!(f, "  long put days left   {}", e.days_remaining_on_long_put)?;

        let cc = &self.covered_call;
        writeln!(f, "Covered call at {}:", format_currency(cc.plan.strike))?;
        writeln!(f, "  premium income       {}", format_currency(cc.premium_income))?;
        writeln!(
            f,
            "  profit if called     {}",
            format_signed_currency(cc.total_profit_if_called_away)
        )?;
        writeln!(
            f,
            "  cycles (premium only) {}",
            format_number(cc.calls_needed_for_premium_only, 0)
        )?;

        writeln!(f, "Scenarios:")?;
        writeln!(
            f,
            "  expires worthless    {} ({} on long put)",
            format_signed_currency(self.expires_worthless.net_pl),
            format_pct(self.expires_worthless.roi_on_long_put)
        )?;
        writeln!(
            f,
            "  assigned max loss    {} (break-even {})",
            format_currency(self.assigned.max_loss),
            format_currency(self.assigned.break_even_stock_price)
        )?;
        for d in &self.downside.drops {
            writeln!(
                f,
                "  drop {:>3}% to {:>10}  net loss {:>12}  protection {:>12}",
                format_number(d.drop_fraction * 100.0, 0),
                format_currency(d.stock_price),
                format_currency(d.net_loss),
                format_currency(d.protection)
            )?;
        }

        let r = &self.recovery;
        writeln!(
            f,
            "Recovery after assignment (cost basis {}):",
            format_currency(r.total_cost_basis)
        )?;
        writeln!(
            f,
            "  A exit                {}  (shares + long put sale)",
            format_signed_currency(r.exit.net)
        )?;
        writeln!(
            f,
            "  B reconfigure         {}  (shares + new put premium, long put kept){}",
            format_signed_currency(r.reconfigure.net),
            if r.reconfigure.valid { "" } else { "  [new put must expire before long put]" }
        )?;
        let pick = match r.recommendation {
            RecoveryPath::Exit => "exit",
            RecoveryPath::Reconfigure => "reconfigure",
        };
        writeln!(f, "  recommendation: {pick}")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Hedge(r) => fmt::Display::fmt(r, f),
            Report::LockIn(r) => fmt::Display::fmt(r, f),
            Report::Wheel(r) => fmt::Display::fmt(r, f),
        }
    }
}
