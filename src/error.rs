// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the record constructors and calculators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinanceError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Undefined result: {0}")]
    Domain(String),
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Category '{0}' is a default category and cannot be removed")]
    DefaultCategory(String),
}

pub type FinanceResult<T> = Result<T, FinanceError>;
