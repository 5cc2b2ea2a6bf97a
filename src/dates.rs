//! Calendar date arithmetic
//!
//! All intervals are actual elapsed days divided by 365.25.

use chrono::NaiveDate;

use crate::error::{LsvError, Result};

/// Days per year for the actual/365.25 convention
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Fractional years from `from` to `to` (negative when `to` precedes `from`)
pub fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

/// Fractional age on `as_of` for someone born on `dob`
pub fn age_at(dob: NaiveDate, as_of: NaiveDate) -> f64 {
    years_between(dob, as_of)
}

/// Parse an ISO `YYYY-MM-DD` date, naming the offending field on failure
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| LsvError::InvalidDateInput {
        field,
        value: value.to_string(),
    })
}

/// `"YYYY-MM"` key used to select the segment rates for a valuation month
pub fn year_month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
