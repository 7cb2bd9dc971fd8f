// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Compound-growth projection of a single investment.
//!
//! Growth compounds annually over a fractional number of years
//! (`months / 12`). The real return compounds at `return - inflation`.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionInput {
    pub principal: Decimal,
    pub duration_months: u32,
    /// Annual nominal return, in percent.
    pub return_rate: Decimal,
    /// Annual inflation, in percent.
    pub inflation_rate: Decimal,
}

/// Derived figures, rounded to 2 dp when computed and never re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub nominal_return: Decimal,
    pub real_return: Decimal,
    pub nominal_gain: Decimal,
    pub real_gain: Decimal,
}

impl Projection {
    /// Applies `f` to every figure and rounds the result back to 2 dp.
    pub fn map_amounts<F>(&self, mut f: F) -> FinanceResult<Projection>
    where
        F: FnMut(Decimal) -> FinanceResult<Decimal>,
    {
        Ok(Projection {
            nominal_return: to_cents(f(self.nominal_return)?),
            real_return: to_cents(f(self.real_return)?),
            nominal_gain: to_cents(f(self.nominal_gain)?),
            real_gain: to_cents(f(self.real_gain)?),
        })
    }
}

/// Rounds to 2 dp and pads the scale, so `1000` is stored as `1000.00`.
pub fn to_cents(value: Decimal) -> Decimal {
    let mut v = value.round_dp(2);
    v.rescale(2);
    v
}

pub fn years(duration_months: u32) -> Decimal {
    Decimal::from(duration_months) / Decimal::from(MONTHS_PER_YEAR)
}

/// `(1 + rate/100) ^ years`.
///
/// A rate below -100% makes the base negative, which has no real-valued
/// fractional power.
pub fn growth_factor(rate_pct: Decimal, years: Decimal) -> FinanceResult<Decimal> {
    if years.is_zero() {
        return Ok(Decimal::ONE);
    }
    let base = Decimal::ONE + rate_pct / Decimal::ONE_HUNDRED;
    if base < Decimal::ZERO {
        return Err(FinanceError::Domain(format!(
            "rate {}% gives a negative growth base {}",
            rate_pct, base
        )));
    }
    if base.is_zero() {
        return Ok(Decimal::ZERO);
    }
    base.checked_powd(years).ok_or_else(|| {
        FinanceError::Domain(format!(
            "growth of {} over {} years overflows",
            base, years
        ))
    })
}

pub fn project(input: &ProjectionInput) -> FinanceResult<Projection> {
    let years = years(input.duration_months);
    let real_rate = input.return_rate - input.inflation_rate;

    let nominal_factor = growth_factor(input.return_rate, years)?;
    let real_factor = growth_factor(real_rate, years)?;

    let overflow = || FinanceError::Domain(format!("projection of {} overflows", input.principal));
    let nominal = input
        .principal
        .checked_mul(nominal_factor)
        .ok_or_else(overflow)?;
    let real = input
        .principal
        .checked_mul(real_factor)
        .ok_or_else(overflow)?;

    tracing::trace!(%years, %nominal, %real, "projected investment");

    Ok(Projection {
        nominal_return: to_cents(nominal),
        real_return: to_cents(real),
        nominal_gain: to_cents(nominal - input.principal),
        real_gain: to_cents(real - input.principal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn input(principal: &str, months: u32, ret: &str, infl: &str) -> ProjectionInput {
        ProjectionInput {
            principal: d(principal),
            duration_months: months,
            return_rate: d(ret),
            inflation_rate: d(infl),
        }
    }

    #[test]
    fn one_year_reduces_to_simple_growth() {
        let p = project(&input("1000", 12, "12", "6")).unwrap();
        assert_eq!(p.nominal_return, d("1120.00"));
        assert_eq!(p.real_return, d("1060.00"));
        assert_eq!(p.nominal_gain, d("120.00"));
        assert_eq!(p.real_gain, d("60.00"));
        assert_eq!(format!("{:.2}", p.nominal_return), "1120.00");
    }

    #[test]
    fn zero_duration_keeps_principal() {
        let p = project(&input("2500.50", 0, "12", "6")).unwrap();
        assert_eq!(p.nominal_return, d("2500.50"));
        assert_eq!(p.real_return, d("2500.50"));
        assert!(p.nominal_gain.is_zero());
        assert!(p.real_gain.is_zero());
    }

    #[test]
    fn figures_always_carry_two_decimals() {
        let flat = project(&input("1000", 12, "0", "0")).unwrap();
        assert_eq!(flat.nominal_return.to_string(), "1000.00");
        assert_eq!(flat.real_return.to_string(), "1000.00");
        assert_eq!(flat.nominal_gain.to_string(), "0.00");

        let none = project(&input("1000", 0, "12", "6")).unwrap();
        assert_eq!(none.nominal_return.to_string(), "1000.00");
        assert_eq!(none.real_gain.to_string(), "0.00");

        let doubled = flat.map_amounts(|v| Ok(v * Decimal::TWO)).unwrap();
        assert_eq!(doubled.nominal_return.to_string(), "2000.00");
    }

    #[test]
    fn to_cents_rounds_then_pads() {
        assert_eq!(to_cents(d("12.346")).to_string(), "12.35");
        assert_eq!(to_cents(d("7")).to_string(), "7.00");
        assert_eq!(to_cents(d("-0.5")).to_string(), "-0.50");
    }

    #[test]
    fn two_years_compound() {
        let p = project(&input("1000", 24, "10", "4")).unwrap();
        // 1000 * 1.1^2 and 1000 * 1.06^2
        assert_eq!(p.nominal_return, d("1210.00"));
        assert_eq!(p.real_return, d("1123.60"));
        assert_eq!(p.real_gain, d("123.60"));
    }

    #[test]
    fn fractional_years_land_between_whole_years() {
        let p = project(&input("1000", 6, "12", "6")).unwrap();
        // sqrt(1.12) = 1.0583005...
        assert!(p.nominal_return > d("1058.00") && p.nominal_return < d("1058.60"));
        assert!(p.real_return > d("1029.00") && p.real_return < d("1030.00"));
        assert_eq!(p.nominal_return.scale(), 2);
    }

    #[test]
    fn negative_real_rate_shrinks_value() {
        let p = project(&input("1000", 12, "2", "8")).unwrap();
        assert_eq!(p.real_return, d("940.00"));
        assert_eq!(p.real_gain, d("-60.00"));
    }

    #[test]
    fn rate_below_minus_hundred_is_a_domain_error() {
        let err = project(&input("1000", 18, "5", "120")).unwrap_err();
        assert!(matches!(err, FinanceError::Domain(_)));
    }

    #[test]
    fn total_loss_rate_goes_to_zero() {
        let p = project(&input("1000", 12, "-100", "0")).unwrap();
        assert!(p.nominal_return.is_zero());
        assert_eq!(p.nominal_gain, d("-1000"));
    }

    #[test]
    fn projection_is_idempotent() {
        let i = input("777.77", 30, "9.5", "3.25");
        assert_eq!(project(&i).unwrap(), project(&i).unwrap());
    }
}
