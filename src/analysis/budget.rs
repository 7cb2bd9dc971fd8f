// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly budget analysis.
//!
//! Two views are offered. [`analyze_goals`] compares the month's spending
//! against the needs/wants/savings percentage split of income.
//! [`analyze_categories`] compares per-category spending against absolute
//! per-category limits.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analysis::aggregate::summarize;
use crate::models::{BudgetBucket, BudgetGoal, Transaction};

/// Share of untagged expenses counted as needs; the rest counts as wants.
pub const UNTAGGED_NEEDS_SHARE: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// First and last day of the calendar month containing `today`, inclusive.
pub fn month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let last_day = match today.month() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(today.year(), 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    };
    let last = today.with_day(last_day).unwrap_or(today);
    (first, last)
}

/// Spending and income restricted to one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyActuals {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Decimal,
    pub total_expenses: Decimal,
    pub category_spending: BTreeMap<String, Decimal>,
    /// Expenses carrying an explicit needs/wants/savings tag.
    pub tagged: BTreeMap<BudgetBucket, Decimal>,
    pub untagged: Decimal,
    #[serde(skip)]
    pub transactions: Vec<Transaction>,
}

impl MonthlyActuals {
    pub fn collect(transactions: &[Transaction], today: NaiveDate) -> MonthlyActuals {
        let (start, end) = month_range(today);
        let month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .cloned()
            .collect();

        let summary = summarize(&month);
        let mut tagged = BTreeMap::new();
        let mut untagged = Decimal::ZERO;
        for t in month.iter().filter(|t| t.is_expense()) {
            match t.bucket {
                Some(bucket) => *tagged.entry(bucket).or_insert(Decimal::ZERO) += t.amount,
                None => untagged += t.amount,
            }
        }

        MonthlyActuals {
            start,
            end,
            income: summary.total_income,
            total_expenses: summary.total_expense,
            category_spending: summary.category_spending,
            tagged,
            untagged,
            transactions: month,
        }
    }

    fn tagged_total(&self, bucket: BudgetBucket) -> Decimal {
        self.tagged.get(&bucket).copied().unwrap_or(Decimal::ZERO)
    }

    /// Spending attributed to needs and wants. Untagged expenses are split
    /// by [`UNTAGGED_NEEDS_SHARE`].
    pub fn needs_and_wants(&self) -> (Decimal, Decimal) {
        let untagged_needs = self.untagged * UNTAGGED_NEEDS_SHARE;
        let untagged_wants = self.untagged - untagged_needs;
        (
            self.tagged_total(BudgetBucket::Needs) + untagged_needs,
            self.tagged_total(BudgetBucket::Wants) + untagged_wants,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketReport {
    pub expected: Decimal,
    pub actual: Decimal,
    /// `actual - expected`.
    pub difference: Decimal,
    /// `actual` as a percentage of income, 2 dp.
    pub percentage: Decimal,
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn analyze_goals(
    actuals: &MonthlyActuals,
    goal: &BudgetGoal,
    income: Decimal,
) -> BTreeMap<BudgetBucket, BucketReport> {
    if income.is_zero() {
        tracing::debug!("no income this month; expected amounts are zero");
    }
    let (needs, wants) = actuals.needs_and_wants();
    let savings = income - (needs + wants);

    BudgetBucket::ALL
        .into_iter()
        .map(|bucket| {
            let expected = income * goal.get(bucket) / Decimal::ONE_HUNDRED;
            let actual = match bucket {
                BudgetBucket::Needs => needs,
                BudgetBucket::Wants => wants,
                BudgetBucket::Savings => savings,
            };
            let report = BucketReport {
                expected,
                actual,
                difference: actual - expected,
                percentage: percent_of(actual, income),
            };
            (bucket, report)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Under,
    Over,
    Unbudgeted,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Under => "under",
            CategoryStatus::Over => "over",
            CategoryStatus::Unbudgeted => "unbudgeted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub budgeted: Decimal,
    pub actual: Decimal,
    /// `budgeted - actual`; negative once the budget is exceeded.
    pub difference: Decimal,
    /// `None` when spending has no budget to measure against.
    pub percentage_used: Option<Decimal>,
    pub status: CategoryStatus,
}

impl CategoryReport {
    fn unbudgeted(actual: Decimal) -> Self {
        CategoryReport {
            budgeted: Decimal::ZERO,
            actual,
            difference: -actual,
            percentage_used: None,
            status: CategoryStatus::Unbudgeted,
        }
    }
}

pub fn analyze_categories(
    spending: &BTreeMap<String, Decimal>,
    goals: &BTreeMap<String, Decimal>,
) -> BTreeMap<String, CategoryReport> {
    let mut out = BTreeMap::new();

    for (category, &budgeted) in goals {
        let actual = spending.get(category).copied().unwrap_or(Decimal::ZERO);
        if budgeted.is_zero() && spending.contains_key(category) {
            out.insert(category.clone(), CategoryReport::unbudgeted(actual));
            continue;
        }
        let difference = budgeted - actual;
        out.insert(
            category.clone(),
            CategoryReport {
                budgeted,
                actual,
                difference,
                percentage_used: Some(percent_of(actual, budgeted)),
                status: if difference >= Decimal::ZERO {
                    CategoryStatus::Under
                } else {
                    CategoryStatus::Over
                },
            },
        );
    }

    for (category, &actual) in spending {
        if !goals.contains_key(category) {
            tracing::debug!(%category, %actual, "spending without a budget");
            out.insert(category.clone(), CategoryReport::unbudgeted(actual));
        }
    }

    out
}
