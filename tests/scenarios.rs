use option_overlay::engine::{break_even, cost, evaluate, valuate, LegSet, OptionLeg, StockPosition};
use option_overlay::report::{build, Report};
use option_overlay::strategy::recovery::{decide, RecoveryInputs, RecoveryPath};
use option_overlay::types::{AppConfig, Calculator};
use option_overlay::utils::math::round_to_cents;

use chrono::NaiveDate;

fn position() -> StockPosition {
    StockPosition::new(300, 46.01, 42.80)
}

fn put_only() -> LegSet {
    LegSet::new(vec![
        OptionLeg::long_put(46.0, 6.70, 45),
        OptionLeg::short_call(50.0, 2.00, 45).with_enabled(false),
    ])
}

#[test]
fn scenario_a_position_valuation() {
    let v = valuate(&position());
    assert_eq!(round_to_cents(v.initial_investment), 13_803.00);
    assert_eq!(round_to_cents(v.current_value), 12_840.00);
    assert_eq!(round_to_cents(v.unrealized_pl), -963.00);
}

#[test]
fn scenario_b_protective_put_break_even() {
    let legs = put_only();
    let costing = cost(&legs, 300);
    assert_eq!(round_to_cents(-costing.per_leg[0].cash_flow), 2_010.00);
    assert_eq!(round_to_cents(costing.net_premium_cash_flow), 2_010.00);

    let be = break_even(&position(), costing.net_premium_cash_flow).unwrap();
    assert_eq!(round_to_cents(be.total_cost_basis), 15_813.00);
    assert_eq!(round_to_cents(be.break_even_price), 52.71);
}

#[test]
fn scenario_c_worst_case_is_floored() {
    let legs = put_only();
    let costing = cost(&legs, 300);
    let r = evaluate(&position(), &legs, &costing, 0.0);
    assert_eq!(r.effective_stock_price, 46.0);
    assert_eq!(round_to_cents(r.position_value), 13_800.00);
    assert_eq!(round_to_cents(r.profit_loss), -2_013.00);
}

#[test]
fn scenario_d_wheel_exit() {
    let plan = decide(&RecoveryInputs {
        short_put_strike: 47.0,
        shares_if_assigned: 100,
        net_put_cost: (4.50 - 3.20) * 100.0,
        spot_after_assignment: 43.0,
        current_long_put_value: 4.50,
        new_put_premium: 2.50,
        new_put_days_to_expiry: 10,
        remaining_days_on_long_put: 35,
    });
    assert_eq!(round_to_cents(plan.total_cost_basis), 4_830.00);
    assert_eq!(round_to_cents(plan.exit.proceeds), 4_750.00);
    assert_eq!(round_to_cents(plan.exit.net), -80.00);
    assert_eq!(plan.recommendation, RecoveryPath::Exit);
}

#[test]
fn sample_config_file_reproduces_defaults() {
    let cfg = AppConfig::from_file("config/overlay.toml").expect("sample config should load");
    let as_of = cfg.as_of.expect("sample config pins as_of");
    assert_eq!(as_of, NaiveDate::from_ymd_opt(2025, 11, 5).unwrap());

    let reports = build(&cfg, &Calculator::ALL, as_of).unwrap();
    assert_eq!(reports.len(), 3);

    match &reports[0] {
        Report::Hedge(r) => assert_eq!(round_to_cents(r.break_even.break_even_price), 52.71),
        other => panic!("expected hedge report, got {}", other.name()),
    }
    match &reports[2] {
        Report::Wheel(r) => {
            assert_eq!(r.entry.days_remaining_on_long_put, 35);
            assert_eq!(round_to_cents(r.recovery.exit.net), -80.00);
            assert!(r.recovery.reconfigure.valid);
        }
        other => panic!("expected wheel report, got {}", other.name()),
    }
}

#[test]
fn json_output_keeps_non_finite_ratios_renderable() {
    let mut cfg = AppConfig::default();
    cfg.position.purchase_price = 0.0;
    cfg.hedge.put.enabled = false;
    let as_of = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();

    let reports = build(&cfg, &[Calculator::Hedge], as_of).unwrap();
    let value = serde_json::to_value(&reports).unwrap();
    // serde_json writes NaN/inf as null.
    assert!(value[0]["valuation"]["unrealized_pl_percent"].is_null());
    assert!(value[0]["valuation"]["current_value"].is_number());
}
