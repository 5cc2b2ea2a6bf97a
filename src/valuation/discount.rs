//! Segmented discounting
//!
//! `v(t)` discounts a payment `t` years out using `i1` over [0, 5], `i2` over
//! (5, 20] and `i3` beyond, carrying the cumulative factor across segments so
//! the curve is continuous at the breakpoints.

use crate::assumptions::{SegmentRates, FIRST_SEGMENT_END, SECOND_SEGMENT_END};

/// Discount factor for time `t` (years)
///
/// Negative `t` falls in the first segment and accumulates at `i1`.
pub fn discount(t: f64, rates: &SegmentRates) -> f64 {
    if t <= FIRST_SEGMENT_END {
        return (1.0 + rates.i1).powf(-t);
    }

    let v5 = (1.0 + rates.i1).powf(-FIRST_SEGMENT_END);
    if t <= SECOND_SEGMENT_END {
        return v5 * (1.0 + rates.i2).powf(-(t - FIRST_SEGMENT_END));
    }

    v5 * (1.0 + rates.i2).powf(-(SECOND_SEGMENT_END - FIRST_SEGMENT_END))
        * (1.0 + rates.i3).powf(-(t - SECOND_SEGMENT_END))
}

/// Closed form of the integral of (1+i)^(-t) over [a, b]
fn integral_flat(a: f64, b: f64, rate: f64) -> f64 {
    let delta = (1.0 + rate).ln();
    if delta.abs() < 1e-12 {
        // Zero force of interest: the integrand is 1
        return b - a;
    }
    ((1.0 + rate).powf(-a) - (1.0 + rate).powf(-b)) / delta
}

/// Integral of `v(t)` over [0, n]
///
/// Returns 0 for `n <= 0` (and for NaN).
pub fn integral_discount_0_to_n(n: f64, rates: &SegmentRates) -> f64 {
    if !(n > 0.0) {
        return 0.0;
    }

    // [0, min(n, 5)]
    let mut total = integral_flat(0.0, n.min(FIRST_SEGMENT_END), rates.i1);
    if n <= FIRST_SEGMENT_END {
        return total;
    }

    // (5, min(n, 20)]
    let v5 = (1.0 + rates.i1).powf(-FIRST_SEGMENT_END);
    let second_len = SECOND_SEGMENT_END - FIRST_SEGMENT_END;
    total += v5 * integral_flat(0.0, (n - FIRST_SEGMENT_END).min(second_len), rates.i2);
    if n <= SECOND_SEGMENT_END {
        return total;
    }

    // beyond 20
    let v20 = v5 * (1.0 + rates.i2).powf(-second_len);
    total + v20 * integral_flat(0.0, n - SECOND_SEGMENT_END, rates.i3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn rates() -> SegmentRates {
        SegmentRates::new(0.0493, 0.0532, 0.0554)
    }

    #[test]
    fn test_discount_at_zero_is_one() {
        assert_eq!(discount(0.0, &rates()), 1.0);
        assert_eq!(discount(0.0, &SegmentRates::new(0.20, -0.5, 3.0)), 1.0);
    }

    #[test]
    fn test_discount_segments() {
        let r = rates();
        assert_relative_eq!(discount(3.0, &r), 1.0493_f64.powf(-3.0), max_relative = 1e-14);
        assert_relative_eq!(
            discount(12.0, &r),
            1.0493_f64.powf(-5.0) * 1.0532_f64.powf(-7.0),
            max_relative = 1e-14
        );
        assert_relative_eq!(
            discount(30.0, &r),
            1.0493_f64.powf(-5.0) * 1.0532_f64.powf(-15.0) * 1.0554_f64.powf(-10.0),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_discount_continuous_at_breakpoints() {
        let r = rates();
        for t in [FIRST_SEGMENT_END, SECOND_SEGMENT_END] {
            let eps = 1e-9;
            assert_abs_diff_eq!(discount(t - eps, &r), discount(t, &r), epsilon = 1e-9);
            assert_abs_diff_eq!(discount(t + eps, &r), discount(t, &r), epsilon = 1e-9);
        }

        // Second-segment formula evaluated at t = 5 agrees with the first
        let from_second = 1.0493_f64.powf(-5.0) * 1.0532_f64.powf(0.0);
        assert_abs_diff_eq!(discount(5.0, &r), from_second, epsilon = 1e-15);
    }

    #[test]
    fn test_negative_time_accumulates() {
        let r = rates();
        assert!(discount(-0.5, &r) > 1.0);
        assert_relative_eq!(discount(-0.5, &r), 1.0493_f64.powf(0.5), max_relative = 1e-14);
    }

    #[test]
    fn test_integral_degenerate() {
        assert_eq!(integral_discount_0_to_n(0.0, &rates()), 0.0);
        assert_eq!(integral_discount_0_to_n(-3.0, &rates()), 0.0);
        assert_eq!(integral_discount_0_to_n(f64::NAN, &rates()), 0.0);
    }

    #[test]
    fn test_integral_matches_flat_closed_form() {
        // With a flat curve the integral is the continuous annuity-certain (1 - v^n) / delta
        let r = SegmentRates::flat(0.05);
        for n in [2.5, 12.0, 35.0] {
            let expected = (1.0 - 1.05_f64.powf(-n)) / 1.05_f64.ln();
            assert_relative_eq!(integral_discount_0_to_n(n, &r), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_integral_zero_rate() {
        let r = SegmentRates::flat(0.0);
        assert_relative_eq!(integral_discount_0_to_n(25.0, &r), 25.0, max_relative = 1e-12);
    }

    #[test]
    fn test_integral_matches_numerical_quadrature() {
        let r = rates();
        let n = 27.3;
        let steps = 200_000;
        let h = n / steps as f64;
        let midpoint: f64 = (0..steps).map(|k| discount((k as f64 + 0.5) * h, &r) * h).sum();
        assert_relative_eq!(integral_discount_0_to_n(n, &r), midpoint, max_relative = 1e-8);
    }

    #[test]
    fn test_integral_strictly_increasing() {
        let r = rates();
        let mut previous = 0.0;
        for step in 1..=160 {
            let n = step as f64 * 0.25;
            let value = integral_discount_0_to_n(n, &r);
            assert!(value > previous, "not increasing at n = {}", n);
            previous = value;
        }
    }
}
