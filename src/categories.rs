// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::TransactionType;

pub const DEFAULT_INCOME: &[&str] = &[
    "Salary",
    "Business",
    "Freelance",
    "Investments",
    "Other Income",
];
pub const DEFAULT_EXPENSE: &[&str] = &[
    "Food",
    "Rent",
    "Entertainment",
    "Shopping",
    "Transportation",
    "Healthcare",
    "Utilities",
    "Other",
];

pub fn defaults(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => DEFAULT_INCOME,
        TransactionType::Expense => DEFAULT_EXPENSE,
    }
}

/// Default plus custom categories for one transaction type, in insertion order.
/// Names never overlap with the other type's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySet {
    pub kind: TransactionType,
    custom: Vec<String>,
}

impl CategorySet {
    pub fn new(kind: TransactionType) -> Self {
        Self {
            kind,
            custom: Vec::new(),
        }
    }

    /// Rebuilds a set from stored custom names, dropping duplicates.
    pub fn with_custom<I, S>(kind: TransactionType, custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(kind);
        for name in custom {
            let _ = set.add(&name.into());
        }
        set
    }

    pub fn is_default(&self, name: &str) -> bool {
        defaults(self.kind).contains(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.is_default(name) || self.custom.iter().any(|c| c == name)
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    pub fn all(&self) -> Vec<String> {
        defaults(self.kind)
            .iter()
            .map(|s| s.to_string())
            .chain(self.custom.iter().cloned())
            .collect()
    }

    /// Returns the trimmed name that was added.
    pub fn add(&mut self, name: &str) -> FinanceResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::Validation(
                "Please enter a category name".into(),
            ));
        }
        if self.contains(name) || defaults(self.kind.opposite()).contains(&name) {
            return Err(FinanceError::DuplicateCategory(name.to_string()));
        }
        self.custom.push(name.to_string());
        Ok(name.to_string())
    }

    /// Returns whether a custom category was removed.
    pub fn remove(&mut self, name: &str) -> FinanceResult<bool> {
        let name = name.trim();
        if self.is_default(name) {
            return Err(FinanceError::DefaultCategory(name.to_string()));
        }
        let before = self.custom.len();
        self.custom.retain(|c| c != name);
        Ok(self.custom.len() != before)
    }
}
