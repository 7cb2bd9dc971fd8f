// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::commands::{fx, investments, transactions};
use fintrack::error::FinanceError;
use fintrack::models::{NewInvestment, NewTransaction, TransactionType};
use fintrack::{cli, db, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    transactions::insert(
        &conn,
        NewTransaction {
            kind: TransactionType::Expense,
            category: "Food".into(),
            amount: Decimal::new(100, 0),
            label: "Groceries".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            bucket: None,
            receipt: None,
        },
    )
    .unwrap();
    investments::insert(
        &conn,
        NewInvestment {
            label: "Index".into(),
            kind: "sip".into(),
            amount: Decimal::new(1000, 0),
            duration_months: 12,
            return_rate: Decimal::new(12, 0),
            inflation_rate: Decimal::new(6, 0),
        },
    )
    .unwrap();
    conn
}

#[test]
fn set_currency_converts_stored_amounts() {
    let mut conn = setup();
    let (from, to) = fx::change_currency(&mut conn, "inr", true).unwrap();
    assert_eq!(from, "USD");
    assert_eq!(to, "INR");
    assert_eq!(utils::get_currency(&conn).unwrap(), "INR");

    let tx = &transactions::load_all(&conn).unwrap()[0];
    assert_eq!(tx.amount, Decimal::new(8312, 0));
    let inv = &investments::load_all(&conn).unwrap()[0];
    assert_eq!(inv.amount, Decimal::new(83120, 0));
    assert_eq!(inv.projection.nominal_return, Decimal::new(9309440, 2));
}

#[test]
fn keep_amounts_only_relabels() {
    let mut conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["fintrack", "fx", "set-currency", "EUR", "--keep-amounts"]);
    if let Some(("fx", fx_m)) = matches.subcommand() {
        fx::handle(&mut conn, fx_m).unwrap();
    } else {
        panic!("no fx subcommand");
    }
    assert_eq!(utils::get_currency(&conn).unwrap(), "EUR");
    assert_eq!(
        transactions::load_all(&conn).unwrap()[0].amount,
        Decimal::new(100, 0)
    );
}

#[test]
fn unknown_currency_leaves_store_untouched() {
    let mut conn = setup();
    let err = fx::change_currency(&mut conn, "XYZ", true).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::UnknownCurrency(_))
    ));
    assert_eq!(utils::get_currency(&conn).unwrap(), "USD");
    assert_eq!(
        transactions::load_all(&conn).unwrap()[0].amount,
        Decimal::new(100, 0)
    );
}

#[test]
fn same_currency_is_a_no_op() {
    let mut conn = setup();
    let (from, to) = fx::change_currency(&mut conn, "usd", true).unwrap();
    assert_eq!(from, to);
    assert_eq!(
        investments::load_all(&conn).unwrap()[0].amount,
        Decimal::new(1000, 0)
    );
}

#[test]
fn overflowing_conversion_rolls_back() {
    let mut conn = setup();
    // stored before amounts were bounded
    conn.execute(
        "INSERT INTO transactions(type, category, amount, label, date)
         VALUES ('income', 'Salary', '79228162514264337593543950335', 'Legacy', '2025-01-03')",
        [],
    )
    .unwrap();
    let err = fx::change_currency(&mut conn, "JPY", true).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::Domain(_))
    ));
    assert_eq!(utils::get_currency(&conn).unwrap(), "USD");
    assert_eq!(
        transactions::load_all(&conn).unwrap()[0].amount,
        Decimal::new(100, 0)
    );
}
