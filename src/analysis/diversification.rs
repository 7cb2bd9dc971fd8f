// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Investment;

/// Number of distinct investment types that earns a full score.
pub const IDEAL_TYPE_COUNT: u32 = 3;

/// A single type above this share of the portfolio is over-concentrated.
pub const CONCENTRATION_LIMIT_PCT: Decimal = Decimal::from_parts(70, 0, 0, false, 0);

pub const START_INVESTING: &str = "Start investing to build wealth over time";
pub const DIVERSIFY_TYPES: &str = "Consider diversifying across multiple asset types";
pub const ADD_EQUITY: &str = "Consider adding equity investments for growth";
pub const ADD_FIXED_DEPOSIT: &str = "Consider fixed deposits for stability";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diversification {
    pub total: Decimal,
    pub by_type: BTreeMap<String, Decimal>,
    /// Percentage of the total held in each type, 2 dp.
    pub allocation: BTreeMap<String, Decimal>,
    pub diversification_score: Decimal,
    pub recommendations: Vec<String>,
}

pub fn analyze(investments: &[Investment]) -> Diversification {
    let total: Decimal = investments.iter().map(|i| i.amount).sum();
    if investments.is_empty() || total.is_zero() {
        return Diversification {
            recommendations: vec![START_INVESTING.to_string()],
            ..Diversification::default()
        };
    }

    let mut by_type: BTreeMap<String, Decimal> = BTreeMap::new();
    for inv in investments {
        *by_type.entry(inv.kind.clone()).or_insert(Decimal::ZERO) += inv.amount;
    }
    let shares: BTreeMap<&str, Decimal> = by_type
        .iter()
        .map(|(kind, amount)| (kind.as_str(), *amount / total * Decimal::ONE_HUNDRED))
        .collect();
    let allocation: BTreeMap<String, Decimal> = shares
        .iter()
        .map(|(kind, share)| (kind.to_string(), share.round_dp(2)))
        .collect();

    let types = by_type.len() as u32;
    let score = (Decimal::from(types) / Decimal::from(IDEAL_TYPE_COUNT) * Decimal::ONE_HUNDRED)
        .min(Decimal::ONE_HUNDRED)
        .round_dp(2);

    let mut recommendations = Vec::new();
    if types < 2 {
        recommendations.push(DIVERSIFY_TYPES.to_string());
    }
    if !by_type.contains_key("sip") && !by_type.contains_key("stocks") {
        recommendations.push(ADD_EQUITY.to_string());
    }
    if !by_type.contains_key("fd") {
        recommendations.push(ADD_FIXED_DEPOSIT.to_string());
    }
    // compared unrounded; the rounded share is for display only
    for (kind, share) in &shares {
        if *share > CONCENTRATION_LIMIT_PCT {
            recommendations.push(format!(
                "{} allocation ({:.1}%) is high. Consider rebalancing.",
                kind,
                share.round_dp(1)
            ));
        }
    }

    Diversification {
        total,
        by_type,
        allocation,
        diversification_score: score,
        recommendations,
    }
}
