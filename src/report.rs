//! Plain-text presentation of a case result
//!
//! Display rules: ages to 6 decimals, monthly amounts in dollars to 2 decimals,
//! PV factors and lump sums to 0 decimals, rates as percentages to 2 decimals.
//! Dollar amounts use comma grouping.

use std::fmt::Write;

use crate::dates::year_month_key;
use crate::valuation::CaseResult;

/// Format with a fixed number of decimals and comma thousands separators
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // No "-0" after rounding
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// US dollar amount, e.g. `$10,919` or `-$1,234.50`
pub fn format_usd(value: f64, decimals: usize) -> String {
    let grouped = format_grouped(value, decimals);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", grouped),
    }
}

/// Rate as a percentage with 2 decimals, e.g. `4.93%`
pub fn format_pct(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Render the full text report of a valuation
pub fn render_report(result: &CaseResult) -> String {
    let inputs = &result.inputs;
    let pv = &result.pv_per_dollar;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "Lump-Sum Valuation");
    let _ = writeln!(out, "{}", "=".repeat(44));
    let _ = writeln!(out, "{:<34} {}", "DOPT month", year_month_key(inputs.dates.plan_termination));
    let _ = writeln!(
        out,
        "{:<34} i1={}  i2={}  i3={}",
        "Segment rates",
        format_pct(inputs.rates.i1),
        format_pct(inputs.rates.i2),
        format_pct(inputs.rates.i3)
    );
    let _ = writeln!(out, "{:<34} {}", "Mortality basis", inputs.mortality_basis);
    let _ = writeln!(out, "{:<34} {}", "Normal form", inputs.form.description());
    if let Some(n) = inputs.form.certain_years() {
        let _ = writeln!(out, "{:<34} {}", "Certain period (years)", n);
    }
    let _ = writeln!(
        out,
        "{:<34} {}",
        "Late retirement adjustment",
        if inputs.apply_late_retirement_adjustment { "Yes" } else { "No" }
    );
    let _ = writeln!(out, "{}", "-".repeat(44));

    let _ = writeln!(out, "{:<34} {:.6}", "Age at NRD", result.ages.at_normal_retirement);
    let _ = writeln!(out, "{:<34} {:.6}", "Age at DOR", result.ages.at_requested_retirement);
    let _ = writeln!(out, "{:<34} {}", "PV per $1 at ASD (NRD)", format_grouped(pv.at_asd_normal_retirement, 0));
    let _ = writeln!(out, "{:<34} {}", "PV per $1 at ASD (DOR)", format_grouped(pv.at_asd_requested_retirement, 0));
    let _ = writeln!(
        out,
        "{:<34} {}",
        "PV per $1 valued at DOPT (NRD)",
        format_grouped(pv.at_plan_termination_normal_retirement, 0)
    );
    let _ = writeln!(
        out,
        "{:<34} {}",
        "PV per $1 valued at DOPT (DOR)",
        format_grouped(pv.at_plan_termination_requested_retirement, 0)
    );
    let _ = writeln!(out, "{:<34} {}", "Benefit at NRD (monthly)", format_usd(result.benefit.at_normal_retirement, 2));
    let _ = writeln!(
        out,
        "{:<34} {}",
        "Benefit at DOR (monthly)",
        format_usd(result.benefit.at_requested_retirement, 2)
    );
    let _ = writeln!(out, "{:<34} {}", "Lump Sum Value", format_usd(result.lump_sum, 0));
    let _ = writeln!(
        out,
        "De minimis: {}  (threshold {})",
        if result.eligible { "YES" } else { "NO" },
        format_usd(result.threshold, 0)
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::SegmentRates;
    use crate::valuation::{
        BenefitForm, CaseAges, CaseBenefits, CaseDates, CaseEcho, CaseResult, PvPerDollar,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0, 0), "0");
        assert_eq!(format_grouped(999.4, 0), "999");
        assert_eq!(format_grouped(1000.0, 0), "1,000");
        assert_eq!(format_grouped(10919.169, 0), "10,919");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-1234.5, 2), "-1,234.50");
        assert_eq!(format_grouped(-0.004, 2), "0.00");
    }

    #[test]
    fn test_format_usd_and_pct() {
        assert_eq!(format_usd(73.79, 2), "$73.79");
        assert_eq!(format_usd(5000.0, 0), "$5,000");
        assert_eq!(format_usd(-1234.5, 2), "-$1,234.50");
        assert_eq!(format_pct(0.0493), "4.93%");
        assert_eq!(format_pct(0.0554), "5.54%");
    }

    #[test]
    fn test_render_report() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let result = CaseResult {
            ages: CaseAges {
                at_normal_retirement: 65.07597535934292,
                at_requested_retirement: 66.32169746748802,
            },
            pv_per_dollar: PvPerDollar {
                at_asd_normal_retirement: 151.627,
                at_asd_requested_retirement: 147.726,
                at_plan_termination_normal_retirement: 147.976,
                at_plan_termination_requested_retirement: 135.780,
            },
            benefit: CaseBenefits {
                at_normal_retirement: 73.79,
                at_requested_retirement: 80.4181,
            },
            lump_sum: 10919.17,
            threshold: 5000.0,
            eligible: false,
            inputs: CaseEcho {
                dates: CaseDates {
                    dob: day(1959, 12, 5),
                    termination_of_employment: day(2024, 5, 31),
                    benefit_freeze: day(2020, 7, 31),
                    normal_retirement: day(2025, 1, 1),
                    requested_retirement: day(2026, 4, 1),
                    plan_termination: day(2024, 6, 30),
                },
                form: BenefitForm::CertainNAndLifeDueMonthly { n: 3.0 },
                apply_late_retirement_adjustment: true,
                rates: SegmentRates::new(0.0493, 0.0532, 0.0554),
                mortality_basis: "417e_2024_unisex".to_string(),
            },
        };

        let report = render_report(&result);
        assert!(report.contains("2024-06"));
        assert!(report.contains("i1=4.93%  i2=5.32%  i3=5.54%"));
        assert!(report.contains("417e_2024_unisex"));
        assert!(report.contains("65.075975"));
        assert!(report.contains("$80.42"));
        assert!(report.contains("$10,919"));
        assert!(report.contains("De minimis: NO  (threshold $5,000)"));
    }
}
