//! Present value per $1 of monthly benefit for each benefit form
//!
//! Factors are valued at the annuity start date:
//! - Life annuity due (monthly): sum of survival * v(k/12) to the terminal age
//! - N-year certain (continuous): 12 * integral of v(t) over [0, n]
//! - N-year certain and life due (monthly): certain payments, then a life
//!   annuity deferred n years weighted by the pure endowment nEx

use serde::{Deserialize, Serialize};

use super::discount::{discount, integral_discount_0_to_n};
use super::survival::monthly_survival;
use crate::assumptions::{MortalityTable, SegmentRates, MAX_TABLE_AGE};
use crate::error::{LsvError, Result};

/// The only payment frequency the factors support
pub const MONTHLY: u32 = 12;

/// Normal form of benefit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form")]
pub enum BenefitForm {
    /// Straight life annuity due, paid monthly
    #[serde(rename = "LIFE_DUE_MTHLY")]
    LifeDueMonthly,

    /// Payments for `n` years certain, paid continuously, no mortality
    #[serde(rename = "CERTAIN_N_CONTINUOUS")]
    CertainNContinuous { n: f64 },

    /// `n` years certain and life thereafter, due, paid monthly
    #[serde(rename = "CERTAIN_N_AND_LIFE_DUE_MTHLY")]
    CertainNAndLifeDueMonthly { n: f64 },
}

impl BenefitForm {
    pub const LIFE_DUE_MTHLY: &'static str = "LIFE_DUE_MTHLY";
    pub const CERTAIN_N_CONTINUOUS: &'static str = "CERTAIN_N_CONTINUOUS";
    pub const CERTAIN_N_AND_LIFE_DUE_MTHLY: &'static str = "CERTAIN_N_AND_LIFE_DUE_MTHLY";

    /// Build a form from its external tag; `n` is ignored by the life-only form
    pub fn from_tag(tag: &str, n: f64) -> Result<Self> {
        match tag.trim() {
            Self::LIFE_DUE_MTHLY => Ok(BenefitForm::LifeDueMonthly),
            Self::CERTAIN_N_CONTINUOUS => Ok(BenefitForm::CertainNContinuous { n }),
            Self::CERTAIN_N_AND_LIFE_DUE_MTHLY => Ok(BenefitForm::CertainNAndLifeDueMonthly { n }),
            other => Err(LsvError::UnknownBenefitForm(other.to_string())),
        }
    }

    /// Whether a form tag carries a certain period
    pub fn tag_uses_certain_period(tag: &str) -> bool {
        matches!(tag.trim(), Self::CERTAIN_N_CONTINUOUS | Self::CERTAIN_N_AND_LIFE_DUE_MTHLY)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            BenefitForm::LifeDueMonthly => Self::LIFE_DUE_MTHLY,
            BenefitForm::CertainNContinuous { .. } => Self::CERTAIN_N_CONTINUOUS,
            BenefitForm::CertainNAndLifeDueMonthly { .. } => Self::CERTAIN_N_AND_LIFE_DUE_MTHLY,
        }
    }

    /// Certain period in years, for the forms that have one
    pub fn certain_years(&self) -> Option<f64> {
        match self {
            BenefitForm::LifeDueMonthly => None,
            BenefitForm::CertainNContinuous { n } | BenefitForm::CertainNAndLifeDueMonthly { n } => Some(*n),
        }
    }

    /// Display name used in reports
    pub fn description(&self) -> &'static str {
        match self {
            BenefitForm::LifeDueMonthly => "Straight life annuity due (monthly)",
            BenefitForm::CertainNContinuous { .. } => "N-year certain (continuous)",
            BenefitForm::CertainNAndLifeDueMonthly { .. } => "N-year certain & life (due, monthly)",
        }
    }
}

/// Factor calculation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnuityConfig {
    /// Payments per year; must be 12
    pub payments_per_year: u32,

    /// Terminal age of the survival projection
    pub max_age: u32,
}

impl Default for AnnuityConfig {
    fn default() -> Self {
        Self {
            payments_per_year: MONTHLY,
            max_age: MAX_TABLE_AGE,
        }
    }
}

/// Computes present value per $1 of monthly benefit at the annuity start date
#[derive(Debug, Clone, Copy)]
pub struct AnnuityFactorCalculator<'a> {
    rates: &'a SegmentRates,
    mortality: &'a MortalityTable,
    config: AnnuityConfig,
}

impl<'a> AnnuityFactorCalculator<'a> {
    pub fn new(rates: &'a SegmentRates, mortality: &'a MortalityTable, config: AnnuityConfig) -> Self {
        Self {
            rates,
            mortality,
            config,
        }
    }

    /// PV per $1/month for `form` starting at `age_at_start`
    pub fn present_value_per_dollar(&self, form: &BenefitForm, age_at_start: f64) -> Result<f64> {
        if self.config.payments_per_year != MONTHLY {
            return Err(LsvError::UnsupportedPaymentFrequency {
                frequency: self.config.payments_per_year,
            });
        }

        let pv = match *form {
            BenefitForm::LifeDueMonthly => self.life_due_monthly(age_at_start),
            BenefitForm::CertainNContinuous { n } => self.certain_continuous(n),
            BenefitForm::CertainNAndLifeDueMonthly { n } => self.certain_and_life_due_monthly(n, age_at_start),
        };
        Ok(pv)
    }

    /// Monthly life annuity due, per $1/month
    pub fn life_due_monthly(&self, age_at_start: f64) -> f64 {
        let terminal = (self.config.max_age + 1) as f64;
        let months_to_max = (12.0 * (terminal - age_at_start.floor())).ceil().max(0.0) as usize;

        let survival = monthly_survival(self.mortality, age_at_start, months_to_max, self.config.max_age);

        survival
            .iter()
            .enumerate()
            .map(|(k, p)| p * discount(k as f64 / 12.0, self.rates))
            .sum()
    }

    /// Continuous n-year certain, per $1/month equivalent (annual intensity 12)
    pub fn certain_continuous(&self, n: f64) -> f64 {
        if !(n > 0.0) {
            return 0.0;
        }
        12.0 * integral_discount_0_to_n(n, self.rates)
    }

    /// Monthly n-year certain and life due, per $1/month
    ///
    /// With `n <= 0` there is no certain period and this is the life annuity.
    pub fn certain_and_life_due_monthly(&self, n: f64, age_at_start: f64) -> f64 {
        if !(n > 0.0) {
            return self.life_due_monthly(age_at_start);
        }

        let certain_months = (12.0 * n).round() as usize;

        // Payments at k = 0..12n-1 regardless of survival
        let annuity_certain: f64 = (0..certain_months)
            .map(|k| discount(k as f64 / 12.0, self.rates))
            .sum();

        // nEx = npx * v(n)
        let survival = monthly_survival(self.mortality, age_at_start, certain_months, self.config.max_age);
        let pure_endowment = survival[certain_months] * discount(n, self.rates);

        let deferred_life = self.life_due_monthly(age_at_start + n);

        annuity_certain + pure_endowment * deferred_life
    }
}
