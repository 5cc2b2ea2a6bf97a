//! Monthly survival probabilities under uniform distribution of deaths
//!
//! Month k applies the decrement of the integer age attained at the start of
//! that month: p = 1 - qx / 12, with qx clamped to [0, 1].

use log::warn;

use crate::assumptions::MortalityTable;

/// qx used for ages the table does not list (certain death)
pub const MISSING_AGE_QX: f64 = 1.0;

/// Monthly survival under UDD for an annual rate
fn monthly_survival_factor(qx: f64) -> f64 {
    1.0 - qx.clamp(0.0, 1.0) / 12.0
}

/// Build `n_months + 1` survival probabilities from `age_at_start`
///
/// Index `k` is the probability of surviving `k` months; index 0 is 1.
/// Attained ages are clamped into [0, max_age] before the table lookup.
pub fn monthly_survival(
    table: &MortalityTable,
    age_at_start: f64,
    n_months: usize,
    max_age: u32,
) -> Vec<f64> {
    let mut survival = Vec::with_capacity(n_months + 1);
    survival.push(1.0);

    let mut missing_ages = 0usize;
    let mut running = 1.0;
    for k in 1..=n_months {
        let age_now = age_at_start + (k - 1) as f64 / 12.0;
        let age = age_now.floor().clamp(0.0, max_age as f64) as u32;

        let qx = table.qx(age).unwrap_or_else(|| {
            missing_ages += 1;
            MISSING_AGE_QX
        });

        running *= monthly_survival_factor(qx);
        survival.push(running);
    }

    if missing_ages > 0 {
        warn!(
            "Mortality basis {} has no qx for {} of {} projected months from age {:.4}; assumed qx = 1",
            table.basis_id(),
            missing_ages,
            n_months,
            age_at_start
        );
    }

    survival
}
