//! Case inputs and results

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::annuity::BenefitForm;
use crate::assumptions::{MortalityTable, SegmentRates};

/// The six dates of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDates {
    /// Date of birth
    pub dob: NaiveDate,
    /// Termination of employment (DOTE)
    pub termination_of_employment: NaiveDate,
    /// Benefit freeze date
    pub benefit_freeze: NaiveDate,
    /// Normal retirement date (NRD)
    pub normal_retirement: NaiveDate,
    /// Requested retirement date (DOR), the annuity start date actually elected
    pub requested_retirement: NaiveDate,
    /// Plan termination date (DOPT), the valuation date
    pub plan_termination: NaiveDate,
}

/// Validated inputs of one valuation
///
/// Constructed by [`crate::case::CaseRequest::validate`] or directly by callers
/// that already trust their values.
#[derive(Debug, Clone)]
pub struct CaseInputs<'a> {
    pub dates: CaseDates,

    /// Monthly benefit payable from the normal retirement date
    pub benefit_at_normal_retirement: f64,

    /// Normal form of benefit, including the certain period where it has one
    pub form: BenefitForm,

    /// Segment rates for the plan termination month
    pub rates: SegmentRates,

    pub mortality: &'a MortalityTable,

    /// Scale the benefit for late commencement by the ratio of PV factors at DOPT
    pub apply_late_retirement_adjustment: bool,

    /// Lump sums strictly below this amount are de minimis
    pub de_minimis_threshold: f64,
}

/// Fractional ages at the two candidate annuity start dates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseAges {
    pub at_normal_retirement: f64,
    pub at_requested_retirement: f64,
}

/// Present value per $1 of monthly benefit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PvPerDollar {
    /// At the annuity start date, starting at NRD
    pub at_asd_normal_retirement: f64,
    /// At the annuity start date, starting at DOR
    pub at_asd_requested_retirement: f64,
    /// NRD start, discounted to the plan termination date
    pub at_plan_termination_normal_retirement: f64,
    /// DOR start, discounted to the plan termination date
    pub at_plan_termination_requested_retirement: f64,
}

/// Monthly benefit amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseBenefits {
    pub at_normal_retirement: f64,
    pub at_requested_retirement: f64,
}

/// Inputs echoed back for traceability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEcho {
    #[serde(flatten)]
    pub dates: CaseDates,
    #[serde(flatten)]
    pub form: BenefitForm,
    pub apply_late_retirement_adjustment: bool,
    pub rates: SegmentRates,
    pub mortality_basis: String,
}

/// Result of a single valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub ages: CaseAges,
    pub pv_per_dollar: PvPerDollar,
    pub benefit: CaseBenefits,
    pub lump_sum: f64,
    pub threshold: f64,
    /// True when the lump sum is strictly below the threshold
    pub eligible: bool,
    pub inputs: CaseEcho,
}
