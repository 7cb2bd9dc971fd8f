// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::commands::categories;
use fintrack::db;
use fintrack::error::FinanceError;
use fintrack::models::TransactionType;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn custom_categories_persist_after_defaults() {
    let conn = setup();
    let name = categories::add_custom(&conn, TransactionType::Expense, "  Pets ").unwrap();
    assert_eq!(name, "Pets");
    let set = categories::load_set(&conn, TransactionType::Expense).unwrap();
    assert!(set.contains("Pets"));
    assert_eq!(set.all().last().map(String::as_str), Some("Pets"));
    assert!(!categories::load_set(&conn, TransactionType::Income)
        .unwrap()
        .contains("Pets"));
}

#[test]
fn duplicate_names_are_rejected() {
    let conn = setup();
    categories::add_custom(&conn, TransactionType::Income, "Royalties").unwrap();
    let err = categories::add_custom(&conn, TransactionType::Income, "Royalties").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::DuplicateCategory(_))
    ));
}

#[test]
fn default_categories_cannot_be_removed() {
    let conn = setup();
    let default = categories::load_set(&conn, TransactionType::Expense)
        .unwrap()
        .all()[0]
        .clone();
    let err = categories::remove_custom(&conn, TransactionType::Expense, &default).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::DefaultCategory(_))
    ));
}

#[test]
fn remove_custom_category() {
    let conn = setup();
    categories::add_custom(&conn, TransactionType::Expense, "Pets").unwrap();
    assert!(categories::remove_custom(&conn, TransactionType::Expense, "Pets").unwrap());
    assert!(!categories::remove_custom(&conn, TransactionType::Expense, "Pets").unwrap());
}

#[test]
fn custom_names_stay_unique_across_kinds() {
    let conn = setup();
    categories::add_custom(&conn, TransactionType::Expense, "Pets").unwrap();
    let err = categories::add_custom(&conn, TransactionType::Income, " Pets").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::DuplicateCategory(_))
    ));
    assert!(categories::add_custom(&conn, TransactionType::Income, "Rent").is_err());
    assert!(!categories::load_set(&conn, TransactionType::Income)
        .unwrap()
        .contains("Pets"));
}
