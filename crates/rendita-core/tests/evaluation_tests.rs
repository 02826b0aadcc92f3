use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rendita_core::evaluation::{
    evaluate_security, recompute_batch, recompute_batch_with, BatchItem, BatchRequest,
    EvaluationInput,
};
use rendita_core::instrument::{PurchaseAssumptions, Security, StampDutyMode};
use rendita_core::trend::{MaturityBucket, MaturityWindow};
use rendita_core::TaxRegime;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ===========================================================================
// Single security
// ===========================================================================

#[test]
fn test_evaluation_from_json() {
    let json = r#"{
        "security": {
            "isin": "IT0005370306",
            "nominal_rate": "5.25",
            "maturity_date": "2029-01-15"
        },
        "purchase": {
            "purchase_date": "2025-01-15",
            "purchase_price": "109.8887",
            "investment_amount": "10000",
            "stamp_duty_mode": "MENSILE"
        }
    }"#;
    let input: EvaluationInput = serde_json::from_str(json).unwrap();
    let out = evaluate_security(&input).unwrap();
    let e = &out.result;

    assert_eq!(e.headline, StampDutyMode::Monthly);
    assert_eq!(e.annual.yield_net_of_duty, dec!(2.1751));
    assert_eq!(e.monthly.yield_net_of_duty, dec!(2.0406));
    assert_eq!(e.bucket, MaturityBucket::SixtyMonths);
    assert_eq!(e.snapshot.gross_yield, dec!(0.0224));
    assert_eq!(e.snapshot.stamp_duty, dec!(80));
    assert_eq!(out.assumptions["security"]["isin"], "IT0005370306");
}

#[test]
fn test_short_bill_buckets() {
    let eval = |maturity: NaiveDate| {
        let input = EvaluationInput {
            security: Security::bot("IT0005611111", maturity),
            purchase: PurchaseAssumptions::new(
                d(2025, 3, 10),
                dec!(99),
                dec!(10000),
                StampDutyMode::Annual,
            ),
        };
        evaluate_security(&input).unwrap().result.bucket
    };
    // 91 days
    assert_eq!(eval(d(2025, 6, 9)), MaturityBucket::ThreeMonths);
    // 200 days
    assert_eq!(eval(d(2025, 9, 26)), MaturityBucket::SixMonths);
    // 365 days
    assert_eq!(eval(d(2026, 3, 10)), MaturityBucket::TwelveMonths);
}

// ===========================================================================
// Batch
// ===========================================================================

fn market() -> Vec<BatchItem> {
    vec![
        BatchItem {
            security: Security::bot("IT0005611111", d(2025, 9, 26)),
            purchase_price: dec!(98.5),
        },
        BatchItem {
            security: Security::btp("IT0005370306", dec!(5.25), d(2029, 1, 15)),
            purchase_price: dec!(109.8887),
        },
        BatchItem {
            security: Security::btp("IT0005001111", dec!(1), d(2025, 3, 1)),
            purchase_price: dec!(99.99),
        },
    ]
}

#[test]
fn test_batch_keeps_item_order() {
    let req = BatchRequest {
        as_of: Some(d(2025, 3, 10)),
        stamp_duty_mode: StampDutyMode::Monthly,
        nominal: None,
        commission_rate: None,
        window: MaturityWindow::All,
        items: market(),
    };
    let out = recompute_batch(&req).unwrap();
    let r = &out.result;

    assert_eq!(r.as_of, d(2025, 3, 10));
    assert_eq!(r.evaluated, 2);
    assert_eq!(r.skipped, vec!["IT0005001111"]);
    let isins: Vec<_> = r.entries.iter().map(|e| e.isin.as_str()).collect();
    assert_eq!(isins, vec!["IT0005611111", "IT0005370306"]);
    let buckets: Vec<_> = r.entries.iter().map(|e| e.bucket).collect();
    // 2029-01-15 is 1407 days out: 3.854795 years
    assert_eq!(
        buckets,
        vec![Some(MaturityBucket::SixMonths), Some(MaturityBucket::ThirtySixMonths)]
    );
    let bot = r.entries[0].evaluation.as_ref().unwrap();
    assert_eq!(bot.headline_result().maturity_payoff, dec!(10112.25));
}

#[test]
fn test_batch_nominal_from_regime() {
    let req = BatchRequest {
        as_of: Some(d(2025, 3, 10)),
        stamp_duty_mode: StampDutyMode::Annual,
        nominal: None,
        commission_rate: None,
        window: MaturityWindow::All,
        items: market(),
    };
    let regime = TaxRegime {
        batch_nominal: dec!(20000),
        ..TaxRegime::default()
    };
    let out = recompute_batch_with(&req, &regime).unwrap();
    let bot = out.result.entries[0].evaluation.as_ref().unwrap();
    assert_eq!(bot.annual.paid_amount, dec!(19700));
    assert_eq!(bot.annual.capital_gain, dec!(300));
}

#[test]
fn test_batch_request_from_json_defaults() {
    let json = r#"{
        "as_of": "2025-03-10",
        "window": "annual",
        "items": [
            { "security": { "isin": "A", "kind": "BOT", "nominal_rate": "0", "maturity_date": "2026-03-10" },
              "purchase_price": "97" },
            { "security": { "isin": "B", "kind": "BOT", "nominal_rate": "0", "maturity_date": "2025-09-26" },
              "purchase_price": "98.5" }
        ]
    }"#;
    let req: BatchRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.stamp_duty_mode, StampDutyMode::Annual);
    let out = recompute_batch(&req).unwrap();
    assert_eq!(out.result.evaluated, 1);
    assert_eq!(out.result.entries[0].isin, "A");
    assert_eq!(out.result.outside_window, vec!["B"]);
}
