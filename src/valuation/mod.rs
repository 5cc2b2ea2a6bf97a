//! Valuation engine: segmented discounting, survival, annuity factors and case orchestration

mod discount;
mod survival;
mod annuity;
mod engine;
mod result;

pub use discount::{discount, integral_discount_0_to_n};
pub use survival::{monthly_survival, MISSING_AGE_QX};
pub use annuity::{AnnuityConfig, AnnuityFactorCalculator, BenefitForm, MONTHLY};
pub use engine::{compute_case, is_de_minimis, ValuationConfig, ValuationEngine};
pub use result::{CaseAges, CaseBenefits, CaseDates, CaseEcho, CaseInputs, CaseResult, PvPerDollar};
