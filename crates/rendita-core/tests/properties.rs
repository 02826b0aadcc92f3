use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rendita_core::instrument::{PurchaseAssumptions, Security, StampDutyMode};
use rendita_core::trend::{classify, MaturityBucket};
use rendita_core::yields::compute_yield;
use rust_decimal::Decimal;

fn purchase_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn scenario(
    rate_bp: u32,
    price_bp: u32,
    amount: u32,
    days: u64,
    mode: StampDutyMode,
) -> (Security, PurchaseAssumptions) {
    let maturity = purchase_date() + Days::new(days);
    let security = Security::btp("IT0000000000", Decimal::new(rate_bp as i64, 2), maturity);
    let purchase = PurchaseAssumptions::new(
        purchase_date(),
        Decimal::new(price_bp as i64, 2),
        Decimal::from(amount),
        mode,
    );
    (security, purchase)
}

fn mode() -> impl Strategy<Value = StampDutyMode> {
    prop_oneof![Just(StampDutyMode::Annual), Just(StampDutyMode::Monthly)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_costs_never_raise_yield(
        rate_bp in 0u32..800,
        price_bp in 8_000u32..12_000,
        amount in 1_000u32..1_000_000,
        days in 1u64..11_000,
        mode in mode(),
    ) {
        let (sec, purchase) = scenario(rate_bp, price_bp, amount, days, mode);
        let r = compute_yield(&sec, &purchase).unwrap().result;
        prop_assert!(r.yield_net_of_duty <= r.yield_net_of_commission);
        prop_assert!(r.yield_net_of_commission <= r.gross_yield);
    }

    #[test]
    fn prop_payoff_is_nominal_plus_gain(
        rate_bp in 0u32..800,
        price_bp in 8_000u32..12_000,
        amount in 1_000u32..1_000_000,
        days in 1u64..11_000,
        mode in mode(),
    ) {
        let (sec, purchase) = scenario(rate_bp, price_bp, amount, days, mode);
        let r = compute_yield(&sec, &purchase).unwrap().result;
        prop_assert_eq!(r.maturity_payoff, purchase.investment_amount + r.gain_net_of_duty);
        prop_assert_eq!(r.capital_gain, purchase.investment_amount - r.paid_amount);
    }

    #[test]
    fn prop_same_input_same_result(
        rate_bp in 0u32..800,
        price_bp in 8_000u32..12_000,
        days in 1u64..11_000,
        mode in mode(),
    ) {
        let (sec, purchase) = scenario(rate_bp, price_bp, 10_000, days, mode);
        let a = compute_yield(&sec, &purchase).unwrap().result;
        let b = compute_yield(&sec, &purchase).unwrap().result;
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_every_horizon_has_exactly_one_bucket(micro_years in 0i64..40_000_000) {
        let years = Decimal::new(micro_years, 6);
        let matching: Vec<_> = MaturityBucket::ALL
            .into_iter()
            .filter(|b| b.contains(years))
            .collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0], classify(years));
    }
}
