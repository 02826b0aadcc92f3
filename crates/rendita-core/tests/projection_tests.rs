use pretty_assertions::assert_eq;
use rendita_core::instrument::StampDutyMode;
use rendita_core::projection::{
    project_final_value, GainTreatment, ProjectionInput, ProjectionMethod, ProjectionScenario,
};
use rendita_core::RenditaError;
use rust_decimal_macros::dec;

fn four_year_btp() -> ProjectionInput {
    ProjectionInput {
        nominal: dec!(10000),
        net_interest: dec!(1864.2969),
        taxable_gain: dec!(-865.2613),
        exempt_gain: Some(dec!(-988.87)),
        commission: dec!(9),
        duty_annual: dec!(20),
        duty_monthly: dec!(80),
        yield_annual_pct: dec!(2.1751),
        yield_monthly_pct: dec!(2.0406),
        yield_exempt_pct: Some(dec!(1.8980)),
        days_to_maturity: 1461,
        years_remaining: dec!(4.002740),
    }
}

#[test]
fn test_four_scenarios_over_four_years() {
    let out = project_final_value(&four_year_btp()).unwrap();
    let r = &out.result;
    assert_eq!(r.method, ProjectionMethod::Annualised);

    let values: Vec<_> = r.scenarios().into_iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec![dec!(10242.34), dec!(10227.35), dec!(10211.46), dec!(10196.47)]
    );
    assert_eq!(
        r.value_for(ProjectionScenario::new(StampDutyMode::Monthly, GainTreatment::Exempt)),
        Some(dec!(10196.47))
    );
    // yields are passed through untouched
    assert_eq!(r.yield_exempt_pct, Some(dec!(1.8980)));
}

#[test]
fn test_threshold_day_switches_to_annualised() {
    let input = ProjectionInput {
        days_to_maturity: 365,
        years_remaining: dec!(1),
        ..four_year_btp()
    };
    assert_eq!(
        project_final_value(&input).unwrap().result.method,
        ProjectionMethod::Annualised
    );

    let input = ProjectionInput {
        days_to_maturity: 364,
        years_remaining: dec!(0.997260),
        ..four_year_btp()
    };
    let r = project_final_value(&input).unwrap().result;
    assert_eq!(r.method, ProjectionMethod::Additive);
    // 10000 + 1864.2969 - 865.2613 - 29
    assert_eq!(r.annual_duty_taxable_gain, dec!(10970.04));
}

#[test]
fn test_projection_from_json_input() {
    let json = r#"{
        "nominal": "10000",
        "net_interest": "150",
        "taxable_gain": "100",
        "commission": "9",
        "duty_annual": "16",
        "duty_monthly": "10",
        "yield_annual_pct": "4.1",
        "yield_monthly_pct": "4.2",
        "days_to_maturity": 200,
        "years_remaining": "0.547945"
    }"#;
    let input: ProjectionInput = serde_json::from_str(json).unwrap();
    let r = project_final_value(&input).unwrap().result;
    assert_eq!(r.annual_duty_taxable_gain, dec!(10225));
    assert_eq!(r.annual_duty_exempt_gain, None);
}

#[test]
fn test_partial_exempt_figures_rejected() {
    let input = ProjectionInput {
        yield_exempt_pct: None,
        ..four_year_btp()
    };
    assert!(matches!(
        project_final_value(&input).unwrap_err(),
        RenditaError::InvalidInput { .. }
    ));
}

#[test]
fn test_long_holding_requires_positive_years() {
    let input = ProjectionInput {
        years_remaining: dec!(0),
        ..four_year_btp()
    };
    let err = project_final_value(&input).unwrap_err();
    assert_eq!(err.field(), Some("years_remaining"));
}
