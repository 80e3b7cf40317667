use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::report::Report;
use crate::types::{AppConfig, OutputFormat};

#[derive(Serialize)]
struct StartupLog<'a> {
    event: &'a str,
    calculators: Vec<&'a str>,
    output_format: &'a str,
    symbol: Option<&'a str>,
    shares: u32,
}

pub fn log_startup(cfg: &AppConfig, calculators: &[&str]) {
    let output_format = match cfg.output.format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
    };
    let payload = StartupLog {
        event: "startup",
        calculators: calculators.to_vec(),
        output_format,
        symbol: cfg.position.symbol.as_deref(),
        shares: cfg.position.shares,
    };
    info!(target: "overlay", startup = serde_json::to_string(&payload).unwrap_or_default().as_str());
}

/// Headline figures for one report, flattened into a single JSON log line.
fn headline(report: &Report) -> serde_json::Value {
    match report {
        Report::Hedge(r) => json!({
            "net_premium_cash_flow": r.costing.net_premium_cash_flow,
            "total_cost_basis": r.break_even.total_cost_basis,
            "break_even_price": r.break_even.break_even_price,
            "max_loss": r.insights.max_loss,
            "max_gain": r.insights.max_gain,
            "inverted_collar": r.inverted_collar,
        }),
        Report::LockIn(r) => json!({
            "strikes": r.rows.len(),
            "selected_strike": r.selected.strike,
            "selected_net_cost": r.selected.net_cost,
            "selected_net_result": r.selected.net_result,
        }),
        Report::Wheel(r) => json!({
            "symbol": r.symbol,
            "net_put_cost": r.entry.net_put_cost,
            "effective_cost_per_share": r.entry.effective_cost_per_share,
            "exit_net": r.recovery.exit.net,
            "reconfigure_net": r.recovery.reconfigure.net,
            "reconfigure_valid": r.recovery.reconfigure.valid,
            "recommendation": r.recovery.recommendation,
        }),
    }
}

#[derive(Serialize)]
struct ReportSummary<'a> {
    event: &'a str,
    calculator: &'a str,
    generated_at: String,
    figures: serde_json::Value,
}

pub fn log_report(report: &Report) {
    let summary = ReportSummary {
        event: "report_summary",
        calculator: report.name(),
        generated_at: Utc::now().to_rfc3339(),
        figures: headline(report),
    };

    let payload = serde_json::to_string(&summary)
        .unwrap_or_else(|_| "{\"event\":\"report_summary_error\"}".to_string());
    info!(target: "report", "{payload}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build;
    use crate::types::Calculator;
    use chrono::NaiveDate;

    #[test]
    fn wheel_headline_carries_recommendation() {
        let as_of = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let reports = build(&AppConfig::default(), &[Calculator::Wheel], as_of).unwrap();
        let figures = headline(&reports[0]);
        assert_eq!(figures["recommendation"], "exit");
        assert_eq!(figures["reconfigure_valid"], true);
        assert!((figures["exit_net"].as_f64().unwrap() + 80.0).abs() < 1e-9);
    }
}
