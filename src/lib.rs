//! Pension LSV - Lump-sum valuation of deferred and immediate pension annuities
//!
//! This library provides:
//! - Segmented-interest discounting (three rate bands: 0-5, 5-20, 20+ years)
//! - Monthly survival from an integer-age mortality table (UDD)
//! - PV factors for life, n-year certain, and certain-and-life forms
//! - Lump-sum value, late retirement adjustment and de minimis test per case
//! - Caller-side validation of raw case requests against the assumption tables

pub mod error;
pub mod dates;
pub mod assumptions;
pub mod valuation;
pub mod case;
pub mod report;

// Re-export commonly used types
pub use error::{LsvError, Result};
pub use assumptions::{Assumptions, MortalityTable, SegmentRateTable, SegmentRates};
pub use valuation::{compute_case, BenefitForm, CaseInputs, CaseResult, ValuationConfig, ValuationEngine};
pub use case::CaseRequest;
