// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::commands::{reports, transactions};
use fintrack::db;
use fintrack::models::{NewTransaction, TransactionType};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let rows = [
        (TransactionType::Income, "Salary", 3000, (2025, 1, 5)),
        (TransactionType::Expense, "Rent", 1000, (2025, 1, 6)),
        (TransactionType::Expense, "Food", 250, (2025, 1, 20)),
        (TransactionType::Income, "Freelance", 400, (2025, 2, 3)),
        (TransactionType::Expense, "Food", 150, (2025, 2, 4)),
        (TransactionType::Expense, "Rent", 1000, (2025, 3, 6)),
    ];
    for (kind, category, amount, (y, m, d)) in rows {
        transactions::insert(
            &conn,
            NewTransaction {
                kind,
                category: category.into(),
                amount: Decimal::new(amount, 0),
                label: category.into(),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                bucket: None,
                receipt: None,
            },
        )
        .unwrap();
    }
    conn
}

#[test]
fn summary_over_all_transactions() {
    let conn = setup();
    let s = reports::summary_for(&conn, None).unwrap();
    assert_eq!(s.total_income, Decimal::new(3400, 0));
    assert_eq!(s.total_expense, Decimal::new(2400, 0));
    assert_eq!(s.balance, Decimal::new(1000, 0));
    assert_eq!(s.category_spending["Food"], Decimal::new(400, 0));
    assert_eq!(s.category_spending["Rent"], Decimal::new(2000, 0));
    assert!(!s.category_spending.contains_key("Salary"));
}

#[test]
fn summary_for_one_month() {
    let conn = setup();
    let s = reports::summary_for(&conn, Some("2025-03")).unwrap();
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::new(-1000, 0));
}

#[test]
fn empty_store_summarizes_to_zero() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let s = reports::summary_for(&conn, None).unwrap();
    assert_eq!(s.balance, Decimal::ZERO);
    assert!(s.category_spending.is_empty());
}

#[test]
fn cashflow_newest_first_and_limited() {
    let conn = setup();
    let rows = reports::recent_cashflow(&conn, 2).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, "2025-03");
    assert_eq!(rows[0].flow.expense, Decimal::new(1000, 0));
    assert_eq!(rows[1].month, "2025-02");
    assert_eq!(rows[1].flow.income, Decimal::new(400, 0));
}
