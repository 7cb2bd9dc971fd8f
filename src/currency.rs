// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Investment, Transaction};

pub const HUB: &str = "USD";

/// Units of each currency per 1 USD.
static RATES: Lazy<BTreeMap<&'static str, Decimal>> = Lazy::new(|| {
    BTreeMap::from([
        ("USD", Decimal::ONE),
        ("EUR", Decimal::new(92, 2)),
        ("GBP", Decimal::new(79, 2)),
        ("INR", Decimal::new(8312, 2)),
        ("JPY", Decimal::new(14950, 2)),
        ("CNY", Decimal::new(724, 2)),
        ("CAD", Decimal::new(136, 2)),
        ("AUD", Decimal::new(152, 2)),
    ])
});

static SYMBOLS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("USD", "$"),
        ("EUR", "€"),
        ("GBP", "£"),
        ("INR", "₹"),
        ("JPY", "¥"),
        ("CNY", "¥"),
        ("CAD", "C$"),
        ("AUD", "A$"),
    ])
});

pub fn supported() -> Vec<&'static str> {
    RATES.keys().copied().collect()
}

pub fn normalize(code: &str) -> FinanceResult<String> {
    let code = code.trim().to_uppercase();
    if RATES.contains_key(code.as_str()) {
        Ok(code)
    } else {
        Err(FinanceError::UnknownCurrency(code))
    }
}

fn usd_rates(from: &str, to: &str) -> FinanceResult<Option<(Decimal, Decimal)>> {
    let (from, to) = (normalize(from)?, normalize(to)?);
    if from == to {
        return Ok(None);
    }
    let lookup = |code: &str| {
        RATES
            .get(code)
            .copied()
            .ok_or_else(|| FinanceError::UnknownCurrency(code.to_string()))
    };
    Ok(Some((lookup(&from)?, lookup(&to)?)))
}

/// Units of `to` per one unit of `from`.
pub fn rate(from: &str, to: &str) -> FinanceResult<Decimal> {
    Ok(match usd_rates(from, to)? {
        Some((f, t)) => t / f,
        None => Decimal::ONE,
    })
}

/// Converts through the USD hub: `amount / rate[from] * rate[to]`.
pub fn convert(amount: Decimal, from: &str, to: &str) -> FinanceResult<Decimal> {
    let Some((f, t)) = usd_rates(from, to)? else {
        return Ok(amount);
    };
    amount
        .checked_div(f)
        .and_then(|usd| usd.checked_mul(t))
        .ok_or_else(|| {
            FinanceError::Domain(format!(
                "converting {} {} to {} overflows",
                amount,
                from.trim().to_uppercase(),
                to.trim().to_uppercase()
            ))
        })
}

pub fn symbol(code: &str) -> &'static str {
    SYMBOLS
        .get(code.trim().to_uppercase().as_str())
        .copied()
        .unwrap_or("$")
}

pub fn format_amount(amount: Decimal, code: &str) -> String {
    format!("{}{:.2}", symbol(code), amount.round_dp(2))
}

pub fn convert_transactions(
    transactions: &[Transaction],
    from: &str,
    to: &str,
) -> FinanceResult<Vec<Transaction>> {
    transactions
        .iter()
        .map(|t| {
            Ok(Transaction {
                amount: convert(t.amount, from, to)?,
                ..t.clone()
            })
        })
        .collect()
}

/// Re-denominates principal and the frozen projection; the projection is
/// re-rounded to 2 dp in the new currency.
pub fn convert_investments(
    investments: &[Investment],
    from: &str,
    to: &str,
) -> FinanceResult<Vec<Investment>> {
    investments
        .iter()
        .map(|inv| {
            Ok(Investment {
                amount: convert(inv.amount, from, to)?,
                projection: inv.projection.map_amounts(|v| convert(v, from, to))?,
                ..inv.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn same_currency_is_identity() {
        assert_eq!(convert(d("12.345"), "eur", "EUR").unwrap(), d("12.345"));
        assert_eq!(rate("GBP", "gbp").unwrap(), Decimal::ONE);
    }

    #[test]
    fn converts_through_usd() {
        assert_eq!(convert(d("100"), "USD", "INR").unwrap(), d("8312"));
        assert_eq!(convert(d("92"), "EUR", "USD").unwrap(), d("100"));
        let inr = convert(d("92"), "EUR", "INR").unwrap();
        assert_eq!(format!("{:.2}", inr.round_dp(2)), "8312.00");
    }

    #[test]
    fn unknown_currency_is_an_error() {
        assert_eq!(
            convert(d("1"), "USD", "xyz").unwrap_err(),
            FinanceError::UnknownCurrency("XYZ".into())
        );
        assert!(rate("ABC", "USD").is_err());
    }

    #[test]
    fn overflowing_conversion_is_a_domain_error() {
        assert!(matches!(
            convert(Decimal::MAX, "USD", "JPY"),
            Err(FinanceError::Domain(_))
        ));
        assert_eq!(convert(Decimal::MAX, "usd", "USD").unwrap(), Decimal::MAX);
    }

    #[test]
    fn formats_with_symbol() {
        assert_eq!(format_amount(d("1234.5"), "inr"), "₹1234.50");
        assert_eq!(format_amount(d("3"), "CAD"), "C$3.00");
        assert_eq!(symbol("ZZZ"), "$");
    }

    #[test]
    fn supported_lists_the_table() {
        let codes = supported();
        assert_eq!(codes.len(), 8);
        assert!(codes.contains(&"JPY"));
    }
}
