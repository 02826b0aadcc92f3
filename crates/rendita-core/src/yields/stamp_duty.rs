//! Stamp duty ("imposta di bollo") on the nominal held.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calendar;
use crate::instrument::StampDutyMode;
use crate::types::{round_half_up, Money, Rate, MONEY_DP};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Duty charged once for the year: nothing when the bond matures by
/// 31 December of the purchase year.
pub fn annual_stamp_duty(
    nominal: Money,
    duty_rate: Rate,
    purchase_date: NaiveDate,
    maturity_date: NaiveDate,
) -> Money {
    if calendar::matures_after_year_end(purchase_date, maturity_date) {
        round_half_up(nominal * duty_rate, MONEY_DP)
    } else {
        Decimal::ZERO
    }
}

/// Duty pro-rated on whole months to maturity; zero when no full month remains.
pub fn monthly_stamp_duty(nominal: Money, duty_rate: Rate, months_to_maturity: i64) -> Money {
    if months_to_maturity <= 0 {
        return Decimal::ZERO;
    }
    round_half_up(
        nominal * duty_rate * Decimal::from(months_to_maturity) / MONTHS_PER_YEAR,
        MONEY_DP,
    )
}

/// Duty for the given accrual mode.
pub fn stamp_duty(
    mode: StampDutyMode,
    nominal: Money,
    duty_rate: Rate,
    purchase_date: NaiveDate,
    maturity_date: NaiveDate,
) -> Money {
    match mode {
        StampDutyMode::Annual => {
            annual_stamp_duty(nominal, duty_rate, purchase_date, maturity_date)
        }
        StampDutyMode::Monthly => monthly_stamp_duty(
            nominal,
            duty_rate,
            calendar::whole_months_between(purchase_date, maturity_date),
        ),
    }
}
