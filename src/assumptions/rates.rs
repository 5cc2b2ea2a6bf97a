//! Segment interest rates and the month-keyed rate table
//!
//! Each month publishes three annual effective rates:
//! - `i1` for years [0, 5]
//! - `i2` for years (5, 20]
//! - `i3` beyond year 20

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::year_month_key;
use crate::error::{LsvError, Result};

/// End of the first segment, in years
pub const FIRST_SEGMENT_END: f64 = 5.0;

/// End of the second segment, in years
pub const SECOND_SEGMENT_END: f64 = 20.0;

/// Three annual effective segment rates
///
/// The engine uses these as-is. Use [`SegmentRates::check`] before handing
/// untrusted values to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRates {
    pub i1: f64,
    pub i2: f64,
    pub i3: f64,
}

impl SegmentRates {
    pub fn new(i1: f64, i2: f64, i3: f64) -> Self {
        Self { i1, i2, i3 }
    }

    /// Same rate in every segment (a flat curve)
    pub fn flat(rate: f64) -> Self {
        Self::new(rate, rate, rate)
    }

    /// Verify every rate is finite and greater than -100%
    pub fn check(&self) -> std::result::Result<(), String> {
        for (name, rate) in [("i1", self.i1), ("i2", self.i2), ("i3", self.i3)] {
            if !rate.is_finite() {
                return Err(format!("{} is not a finite number", name));
            }
            if rate <= -1.0 {
                return Err(format!("{} = {} must be greater than -1", name, rate));
            }
        }
        Ok(())
    }
}

/// Segment rates keyed by `"YYYY-MM"` valuation month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentRateTable {
    by_month: BTreeMap<String, SegmentRates>,
}

impl SegmentRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rates for a month key
    pub fn insert(&mut self, year_month: impl Into<String>, rates: SegmentRates) {
        self.by_month.insert(year_month.into(), rates);
    }

    pub fn get(&self, year_month: &str) -> Option<SegmentRates> {
        self.by_month.get(year_month).copied()
    }

    /// Rates published for the month containing `date`
    pub fn for_date(&self, date: NaiveDate) -> Option<SegmentRates> {
        self.get(&year_month_key(date))
    }

    /// Like [`for_date`](Self::for_date), failing with `MissingRateTableForMonth`
    pub fn require_for_date(&self, date: NaiveDate) -> Result<SegmentRates> {
        let key = year_month_key(date);
        self.get(&key).ok_or(LsvError::MissingRateTableForMonth(key))
    }

    /// Month keys in ascending order
    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.by_month.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_month.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty()
    }
}

impl FromIterator<(String, SegmentRates)> for SegmentRateTable {
    fn from_iter<T: IntoIterator<Item = (String, SegmentRates)>>(iter: T) -> Self {
        Self {
            by_month: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rejects_bad_rates() {
        assert!(SegmentRates::new(0.05, 0.055, 0.06).check().is_ok());
        assert!(SegmentRates::new(-0.5, 0.0, 0.01).check().is_ok());

        let err = SegmentRates::new(0.05, -1.0, 0.06).check().unwrap_err();
        assert!(err.contains("i2"));

        assert!(SegmentRates::new(f64::NAN, 0.05, 0.05).check().is_err());
        assert!(SegmentRates::new(0.05, 0.05, f64::INFINITY).check().is_err());
    }

    #[test]
    fn test_lookup_by_date() {
        let table: SegmentRateTable = [
            ("2024-05".to_string(), SegmentRates::new(0.049, 0.053, 0.055)),
            ("2024-06".to_string(), SegmentRates::new(0.050, 0.054, 0.056)),
        ]
        .into_iter()
        .collect();

        let june = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(table.for_date(june).unwrap().i1, 0.050);
        assert_eq!(table.months().collect::<Vec<_>>(), vec!["2024-05", "2024-06"]);

        let july = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(table.for_date(july).is_none());
        let err = table.require_for_date(july).unwrap_err();
        assert_eq!(err.kind(), "MissingRateTableForMonth");
        assert!(err.to_string().contains("2024-07"));
    }
}
