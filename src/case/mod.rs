//! Case requests and caller-side validation
//!
//! A `CaseRequest` is the raw form input: ISO date strings, a form tag and plain
//! numbers. `validate` checks it against the assumption tables and produces the
//! `CaseInputs` the engine consumes. The engine itself never re-validates.

pub mod loader;

pub use loader::{load_case, load_case_from_reader};

use serde::{Deserialize, Serialize};

use crate::assumptions::{MortalityTable, SegmentRateTable};
use crate::dates::{parse_iso_date, year_month_key};
use crate::error::{LsvError, Result};
use crate::valuation::{BenefitForm, CaseDates, CaseInputs};

/// Default de minimis threshold
pub const DEFAULT_DE_MINIMIS_THRESHOLD: f64 = 5000.0;

fn default_threshold() -> f64 {
    DEFAULT_DE_MINIMIS_THRESHOLD
}

fn default_true() -> bool {
    true
}

/// Unvalidated case input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRequest {
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,

    #[serde(alias = "dote")]
    pub termination_of_employment: String,

    #[serde(alias = "freeze_date")]
    pub benefit_freeze: String,

    #[serde(alias = "nrd")]
    pub normal_retirement: String,

    #[serde(alias = "dor")]
    pub requested_retirement: String,

    #[serde(alias = "dopt")]
    pub plan_termination: String,

    /// Monthly benefit at NRD
    #[serde(alias = "benefit_at_nrd")]
    pub benefit_at_normal_retirement: f64,

    /// Form tag, e.g. "CERTAIN_N_AND_LIFE_DUE_MTHLY"
    pub form: String,

    /// Certain period in years (required by the certain forms)
    #[serde(default)]
    pub n: Option<f64>,

    #[serde(default = "default_true")]
    pub apply_late_retirement_adjustment: bool,

    #[serde(default = "default_threshold")]
    pub de_minimis_threshold: f64,
}

impl CaseRequest {
    /// The reference case: 73.79/month, 3-year certain and life, DOPT 2024-06-30
    pub fn worked_example() -> Self {
        Self {
            dob: "1959-12-05".to_string(),
            termination_of_employment: "2024-05-31".to_string(),
            benefit_freeze: "2020-07-31".to_string(),
            normal_retirement: "2025-01-01".to_string(),
            requested_retirement: "2026-04-01".to_string(),
            plan_termination: "2024-06-30".to_string(),
            benefit_at_normal_retirement: 73.79,
            form: BenefitForm::CERTAIN_N_AND_LIFE_DUE_MTHLY.to_string(),
            n: Some(3.0),
            apply_late_retirement_adjustment: true,
            de_minimis_threshold: DEFAULT_DE_MINIMIS_THRESHOLD,
        }
    }

    /// Parse the six dates
    pub fn dates(&self) -> Result<CaseDates> {
        Ok(CaseDates {
            dob: parse_iso_date("dob", &self.dob)?,
            termination_of_employment: parse_iso_date("termination_of_employment", &self.termination_of_employment)?,
            benefit_freeze: parse_iso_date("benefit_freeze", &self.benefit_freeze)?,
            normal_retirement: parse_iso_date("normal_retirement", &self.normal_retirement)?,
            requested_retirement: parse_iso_date("requested_retirement", &self.requested_retirement)?,
            plan_termination: parse_iso_date("plan_termination", &self.plan_termination)?,
        })
    }

    /// Check the request and resolve the segment rates for the DOPT month
    pub fn validate<'a>(
        &self,
        rate_table: &SegmentRateTable,
        mortality: &'a MortalityTable,
    ) -> Result<CaseInputs<'a>> {
        let dates = self.dates()?;

        let rates = rate_table.require_for_date(dates.plan_termination)?;
        rates.check().map_err(|reason| LsvError::InvalidSegmentRates {
            year_month: year_month_key(dates.plan_termination),
            reason,
        })?;

        let benefit = self.benefit_at_normal_retirement;
        if !benefit.is_finite() || benefit < 0.0 {
            return Err(LsvError::InvalidBenefitAmount(benefit));
        }

        let n = if BenefitForm::tag_uses_certain_period(&self.form) {
            let n = self.n.unwrap_or(f64::NAN);
            if !n.is_finite() || n < 0.0 {
                return Err(LsvError::InvalidCertainPeriod(n));
            }
            n
        } else {
            0.0
        };
        let form = BenefitForm::from_tag(&self.form, n)?;

        if !self.de_minimis_threshold.is_finite() {
            return Err(LsvError::InvalidThreshold(self.de_minimis_threshold));
        }

        Ok(CaseInputs {
            dates,
            benefit_at_normal_retirement: benefit,
            form,
            rates,
            mortality,
            apply_late_retirement_adjustment: self.apply_late_retirement_adjustment,
            de_minimis_threshold: self.de_minimis_threshold,
        })
    }
}

impl Default for CaseRequest {
    fn default() -> Self {
        Self::worked_example()
    }
}
