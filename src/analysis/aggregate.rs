// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Expense totals per category.
    pub category_spending: BTreeMap<String, Decimal>,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    for t in transactions {
        match t.kind {
            TransactionType::Income => summary.total_income += t.amount,
            TransactionType::Expense => {
                summary.total_expense += t.amount;
                *summary
                    .category_spending
                    .entry(t.category.clone())
                    .or_insert(Decimal::ZERO) += t.amount;
            }
        }
    }
    summary.balance = summary.total_income - summary.total_expense;
    summary
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthFlow {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense per `YYYY-MM`, oldest first.
pub fn monthly_cashflow(transactions: &[Transaction]) -> BTreeMap<String, MonthFlow> {
    let mut map: BTreeMap<String, MonthFlow> = BTreeMap::new();
    for t in transactions {
        let entry = map.entry(t.date.format("%Y-%m").to_string()).or_default();
        match t.kind {
            TransactionType::Income => entry.income += t.amount,
            TransactionType::Expense => entry.expense += t.amount,
        }
    }
    map
}
