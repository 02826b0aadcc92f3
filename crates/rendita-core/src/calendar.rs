//! Calendar arithmetic shared by the yield calculator, the projector and the
//! maturity buckets.

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{round_half_up, Years, YEARS_DP};

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Local calendar date, used when a caller leaves the purchase date out.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Actual calendar days from `start` to `end` (negative when `end` precedes `start`).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Complete calendar months from `start` to `end`.
///
/// A month only counts once the day-of-month has been reached again, so
/// 31 Jan -> 28 Feb is zero months and 15 Jan -> 15 Mar is two.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let start_months = start.year() as i64 * 12 + start.month0() as i64;
    let end_months = end.year() as i64 * 12 + end.month0() as i64;
    let mut months = end_months - start_months;

    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }
    months
}

/// 31 December of the year `date` falls in.
pub fn end_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}

/// True when `maturity` lies after 31 December of the purchase year.
pub fn matures_after_year_end(purchase: NaiveDate, maturity: NaiveDate) -> bool {
    maturity > end_of_year(purchase)
}

/// Years for a day count on a 365-day year, 6 fractional digits.
pub fn years_from_days(days: i64) -> Years {
    round_half_up(Decimal::from(days) / DAYS_PER_YEAR, YEARS_DP)
}

/// Years from `start` to `end` on a 365-day year.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> Years {
    years_from_days(days_between(start, end))
}
