//! Lump-sum valuation of a single case
//!
//! Ages come from actual/365.25 day counts. Each candidate annuity start date
//! (NRD and DOR) gets a PV factor at its start date, which is then discounted to
//! the plan termination date with the segmented curve. Mortality before the
//! start date is not applied: values are conditional on survival to commencement.

use log::{debug, warn};

use super::annuity::{AnnuityConfig, AnnuityFactorCalculator};
use super::discount::discount;
use super::result::{CaseAges, CaseBenefits, CaseEcho, CaseInputs, CaseResult, PvPerDollar};
use crate::dates::{age_at, years_between};
use crate::error::Result;

/// Configuration for a valuation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationConfig {
    pub annuity: AnnuityConfig,
}

/// De minimis test: equality is not eligible
pub fn is_de_minimis(lump_sum: f64, threshold: f64) -> bool {
    lump_sum < threshold
}

/// Main valuation engine
///
/// Holds only configuration; every case is computed from its own inputs.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Value one case
    ///
    /// Fails only with the errors of the annuity factor calculator.
    pub fn compute_case(&self, inputs: &CaseInputs<'_>) -> Result<CaseResult> {
        let dates = &inputs.dates;
        let calculator = AnnuityFactorCalculator::new(&inputs.rates, inputs.mortality, self.config.annuity);

        let age_nrd = age_at(dates.dob, dates.normal_retirement);
        let age_dor = age_at(dates.dob, dates.requested_retirement);

        let pv_asd_nrd = calculator.present_value_per_dollar(&inputs.form, age_nrd)?;
        let pv_asd_dor = calculator.present_value_per_dollar(&inputs.form, age_dor)?;

        // Deferral may be negative when the start date precedes DOPT
        let deferral_nrd = years_between(dates.plan_termination, dates.normal_retirement);
        let deferral_dor = years_between(dates.plan_termination, dates.requested_retirement);

        let pv_dopt_nrd = discount(deferral_nrd, &inputs.rates) * pv_asd_nrd;
        let pv_dopt_dor = discount(deferral_dor, &inputs.rates) * pv_asd_dor;

        debug!(
            "{}: ages {:.6}/{:.6}, PV at ASD {:.6}/{:.6}, PV at DOPT {:.6}/{:.6}",
            inputs.form.tag(),
            age_nrd,
            age_dor,
            pv_asd_nrd,
            pv_asd_dor,
            pv_dopt_nrd,
            pv_dopt_dor
        );

        let benefit_nrd = inputs.benefit_at_normal_retirement;
        let benefit_dor = if inputs.apply_late_retirement_adjustment {
            if pv_dopt_dor != 0.0 {
                // Actuarial equivalence at DOPT
                benefit_nrd * (pv_dopt_nrd / pv_dopt_dor)
            } else {
                warn!("PV factor for the requested retirement date is zero; late retirement adjustment skipped");
                benefit_nrd
            }
        } else {
            benefit_nrd
        };

        // The PV factor already sums the monthly payments
        let lump_sum = benefit_dor * pv_dopt_dor;
        let eligible = is_de_minimis(lump_sum, inputs.de_minimis_threshold);

        debug!(
            "benefit at DOR {:.4}, lump sum {:.2}, de minimis {}",
            benefit_dor, lump_sum, eligible
        );

        Ok(CaseResult {
            ages: CaseAges {
                at_normal_retirement: age_nrd,
                at_requested_retirement: age_dor,
            },
            pv_per_dollar: PvPerDollar {
                at_asd_normal_retirement: pv_asd_nrd,
                at_asd_requested_retirement: pv_asd_dor,
                at_plan_termination_normal_retirement: pv_dopt_nrd,
                at_plan_termination_requested_retirement: pv_dopt_dor,
            },
            benefit: CaseBenefits {
                at_normal_retirement: benefit_nrd,
                at_requested_retirement: benefit_dor,
            },
            lump_sum,
            threshold: inputs.de_minimis_threshold,
            eligible,
            inputs: CaseEcho {
                dates: *dates,
                form: inputs.form,
                apply_late_retirement_adjustment: inputs.apply_late_retirement_adjustment,
                rates: inputs.rates,
                mortality_basis: inputs.mortality.basis_id().to_string(),
            },
        })
    }
}

/// Value one case with the default configuration
pub fn compute_case(inputs: &CaseInputs<'_>) -> Result<CaseResult> {
    ValuationEngine::default().compute_case(inputs)
}
