// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::aggregate::{MonthFlow, Summary, monthly_cashflow, summarize};
use crate::commands::transactions::load_all;
use crate::models::Transaction;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Totals over every stored transaction, or one `YYYY-MM` month.
pub fn summary_for(conn: &Connection, month: Option<&str>) -> Result<Summary> {
    let txs: Vec<Transaction> = load_all(conn)?
        .into_iter()
        .filter(|t| month.is_none_or(|m| t.date.format("%Y-%m").to_string() == m.trim()))
        .collect();
    Ok(summarize(&txs))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = summary_for(conn, sub.get_one::<String>("month").map(|m| m.as_str()))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&s.total_income, &ccy),
                fmt_money(&s.total_expense, &ccy),
                fmt_money(&s.balance, &ccy),
            ]],
        )
    );
    let mut items: Vec<_> = s.category_spending.iter().collect();
    items.sort_by(|a, b| b.1.cmp(a.1));
    let rows = items
        .into_iter()
        .map(|(cat, amt)| vec![cat.clone(), fmt_money(amt, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CashflowRow {
    pub month: String,
    #[serde(flatten)]
    pub flow: MonthFlow,
}

/// The most recent `months` months that have activity, newest first.
pub fn recent_cashflow(conn: &Connection, months: usize) -> Result<Vec<CashflowRow>> {
    let map = monthly_cashflow(&load_all(conn)?);
    Ok(map
        .into_iter()
        .rev()
        .take(months)
        .map(|(month, flow)| CashflowRow { month, flow })
        .collect())
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let data = recent_cashflow(conn, months)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    fmt_money(&r.flow.income, &ccy),
                    fmt_money(&r.flow.expense, &ccy),
                    fmt_money(&(r.flow.income - r.flow.expense), &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense", "Net"], rows));
    }
    Ok(())
}
