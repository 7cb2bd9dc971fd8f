// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::projection::{Projection, ProjectionInput, project};
use crate::error::{FinanceError, FinanceResult};

/// Largest accepted transaction or principal amount, 10^15. Keeps sums and
/// currency conversions far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

fn check_amount(what: &str, amount: Decimal) -> FinanceResult<()> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::Validation(format!(
            "{} must be positive, got {}",
            what, amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(FinanceError::Validation(format!(
            "{} {} exceeds the maximum of {}",
            what, amount, MAX_AMOUNT
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn opposite(&self) -> TransactionType {
        match self {
            TransactionType::Income => TransactionType::Expense,
            TransactionType::Expense => TransactionType::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FinanceError::Validation(format!(
                "Unknown transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

/// Needs / wants / savings split of income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBucket {
    Needs,
    Wants,
    Savings,
}

impl BudgetBucket {
    pub const ALL: [BudgetBucket; 3] = [BudgetBucket::Needs, BudgetBucket::Wants, BudgetBucket::Savings];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetBucket::Needs => "needs",
            BudgetBucket::Wants => "wants",
            BudgetBucket::Savings => "savings",
        }
    }
}

impl fmt::Display for BudgetBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetBucket {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "needs" => Ok(BudgetBucket::Needs),
            "wants" => Ok(BudgetBucket::Wants),
            "savings" => Ok(BudgetBucket::Savings),
            other => Err(FinanceError::Validation(format!(
                "Unknown budget bucket '{}', expected needs|wants|savings",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub label: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<BudgetBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// A transaction as entered by the user, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub label: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub bucket: Option<BudgetBucket>,
    #[serde(default)]
    pub receipt: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> FinanceResult<()> {
        check_amount("Amount", self.amount)?;
        if self.label.trim().is_empty() {
            return Err(FinanceError::Validation("Label must not be empty".into()));
        }
        if self.category.trim().is_empty() {
            return Err(FinanceError::Validation("Category must not be empty".into()));
        }
        if self.kind == TransactionType::Income && self.bucket.is_some() {
            return Err(FinanceError::Validation(
                "Only expenses can carry a needs/wants/savings tag".into(),
            ));
        }
        Ok(())
    }

    pub fn into_transaction(self, id: i64) -> FinanceResult<Transaction> {
        self.validate()?;
        Ok(Transaction {
            id,
            kind: self.kind,
            category: self.category.trim().to_string(),
            amount: self.amount,
            label: self.label.trim().to_string(),
            date: self.date,
            bucket: self.bucket,
            receipt: self.receipt,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Decimal,
    pub duration_months: u32,
    pub return_rate: Decimal,
    pub inflation_rate: Decimal,
    #[serde(flatten)]
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestment {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Decimal,
    pub duration_months: u32,
    pub return_rate: Decimal,
    pub inflation_rate: Decimal,
}

impl NewInvestment {
    pub fn validate(&self) -> FinanceResult<()> {
        check_amount("Principal", self.amount)?;
        if self.duration_months == 0 {
            return Err(FinanceError::Validation(
                "Duration must be at least one month".into(),
            ));
        }
        if self.label.trim().is_empty() {
            return Err(FinanceError::Validation("Label must not be empty".into()));
        }
        if self.kind.trim().is_empty() {
            return Err(FinanceError::Validation("Investment type must not be empty".into()));
        }
        Ok(())
    }

    pub fn projection_input(&self) -> ProjectionInput {
        ProjectionInput {
            principal: self.amount,
            duration_months: self.duration_months,
            return_rate: self.return_rate,
            inflation_rate: self.inflation_rate,
        }
    }
}

impl Investment {
    /// Validates the input and freezes its projected returns onto the record.
    pub fn create(id: i64, new: NewInvestment) -> FinanceResult<Investment> {
        new.validate()?;
        let projection = project(&new.projection_input())?;
        Ok(Investment {
            id,
            label: new.label.trim().to_string(),
            kind: normalize_kind(&new.kind),
            amount: new.amount,
            duration_months: new.duration_months,
            return_rate: new.return_rate,
            inflation_rate: new.inflation_rate,
            projection,
        })
    }
}

pub fn normalize_kind(kind: &str) -> String {
    kind.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

impl Default for BudgetGoal {
    fn default() -> Self {
        Self {
            needs: Decimal::from(50),
            wants: Decimal::from(30),
            savings: Decimal::from(20),
        }
    }
}

impl BudgetGoal {
    pub fn get(&self, bucket: BudgetBucket) -> Decimal {
        match bucket {
            BudgetBucket::Needs => self.needs,
            BudgetBucket::Wants => self.wants,
            BudgetBucket::Savings => self.savings,
        }
    }

    pub fn total(&self) -> Decimal {
        self.needs + self.wants + self.savings
    }

    /// Percentages must be non-negative and add up to exactly 100.
    pub fn validate(&self) -> FinanceResult<()> {
        for bucket in BudgetBucket::ALL {
            let pct = self.get(bucket);
            if pct < Decimal::ZERO {
                return Err(FinanceError::Validation(format!(
                    "{} percentage must not be negative, got {}",
                    bucket, pct
                )));
            }
        }
        let total = self.total();
        if total != Decimal::ONE_HUNDRED {
            return Err(FinanceError::Validation(format!(
                "Budget goal percentages must sum to 100, got {}",
                total
            )));
        }
        Ok(())
    }
}

pub fn parse_iso_date(s: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}
