// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::diversification::analyze;
use crate::analysis::projection::Projection;
use crate::models::{Investment, NewInvestment};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_decimal, parse_stored_decimal, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, Row, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("analyze", sub)) => diversification(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewInvestment {
        label: sub.get_one::<String>("label").unwrap().trim().to_string(),
        kind: sub.get_one::<String>("type").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        duration_months: *sub.get_one::<u32>("months").unwrap(),
        return_rate: parse_decimal(sub.get_one::<String>("return-rate").unwrap())?,
        inflation_rate: parse_decimal(sub.get_one::<String>("inflation").unwrap())?,
    };
    let inv = insert(conn, new)?;
    let ccy = get_currency(conn)?;
    println!(
        "Added {} '{}' {} over {} months: nominal {} (gain {}), real {} (gain {}) [id {}]",
        inv.kind,
        inv.label,
        fmt_money(&inv.amount, &ccy),
        inv.duration_months,
        fmt_money(&inv.projection.nominal_return, &ccy),
        fmt_money(&inv.projection.nominal_gain, &ccy),
        fmt_money(&inv.projection.real_return, &ccy),
        fmt_money(&inv.projection.real_gain, &ccy),
        inv.id
    );
    Ok(())
}

/// Projects and stores an investment. The projection is frozen on insert.
pub fn insert(conn: &Connection, new: NewInvestment) -> Result<Investment> {
    let inv = Investment::create(0, new)?;
    conn.execute(
        "INSERT INTO investments(label, type, amount, duration_months, return_rate, inflation_rate,
                                 nominal_return, real_return, nominal_gain, real_gain)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
        params![
            &inv.label,
            &inv.kind,
            inv.amount.to_string(),
            inv.duration_months,
            inv.return_rate.to_string(),
            inv.inflation_rate.to_string(),
            inv.projection.nominal_return.to_string(),
            inv.projection.real_return.to_string(),
            inv.projection.nominal_gain.to_string(),
            inv.projection.real_gain.to_string(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, kind = %inv.kind, amount = %inv.amount, "investment recorded");
    Ok(Investment { id, ..inv })
}

/// Rewrites every stored amount, e.g. after a display currency change.
pub fn replace_amounts(conn: &Connection, investments: &[Investment]) -> Result<()> {
    let mut stmt = conn.prepare(
        "UPDATE investments SET amount=?1, nominal_return=?2, real_return=?3,
                                nominal_gain=?4, real_gain=?5 WHERE id=?6",
    )?;
    for inv in investments {
        stmt.execute(params![
            inv.amount.to_string(),
            inv.projection.nominal_return.to_string(),
            inv.projection.real_return.to_string(),
            inv.projection.nominal_gain.to_string(),
            inv.projection.real_gain.to_string(),
            inv.id,
        ])?;
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM investments WHERE id=?1", params![id])?;
    Ok(n > 0)
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !delete(conn, id)? {
        return Err(anyhow!("Investment {} not found", id));
    }
    println!("Removed investment {}", id);
    Ok(())
}

fn from_row(r: &Row<'_>) -> Result<Investment> {
    let id: i64 = r.get(0)?;
    let dec = |idx: usize, what: &str| -> Result<rust_decimal::Decimal> {
        let s: String = r.get(idx)?;
        parse_stored_decimal(&s, what).with_context(|| format!("Investment {}", id))
    };
    Ok(Investment {
        id,
        label: r.get(1)?,
        kind: r.get(2)?,
        amount: dec(3, "amount")?,
        duration_months: r.get(4)?,
        return_rate: dec(5, "return rate")?,
        inflation_rate: dec(6, "inflation rate")?,
        projection: Projection {
            nominal_return: dec(7, "nominal return")?,
            real_return: dec(8, "real return")?,
            nominal_gain: dec(9, "nominal gain")?,
            real_gain: dec(10, "real gain")?,
        },
    })
}

pub fn load_all(conn: &Connection) -> Result<Vec<Investment>> {
    let mut stmt = conn.prepare(
        "SELECT id, label, type, amount, duration_months, return_rate, inflation_rate,
                nominal_return, real_return, nominal_gain, real_gain
         FROM investments ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(from_row(r)?);
    }
    Ok(out)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = load_all(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|i| {
                vec![
                    i.id.to_string(),
                    i.label.clone(),
                    i.kind.clone(),
                    fmt_money(&i.amount, &ccy),
                    i.duration_months.to_string(),
                    format!("{}%", i.return_rate),
                    format!("{}%", i.inflation_rate),
                    fmt_money(&i.projection.nominal_return, &ccy),
                    fmt_money(&i.projection.real_return, &ccy),
                    fmt_money(&i.projection.real_gain, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Label", "Type", "Principal", "Months", "Return", "Inflation", "Nominal",
                    "Real", "Real Gain",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn diversification(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let analysis = analyze(&load_all(conn)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &analysis)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = analysis
        .by_type
        .iter()
        .map(|(kind, amount)| {
            vec![
                kind.clone(),
                fmt_money(amount, &ccy),
                format!("{:.1}%", analysis.allocation[kind]),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Type", "Amount", "Share"], rows));
    println!("Total: {}", fmt_money(&analysis.total, &ccy));
    println!(
        "Diversification score: {:.0}/100",
        analysis.diversification_score
    );
    for rec in &analysis.recommendations {
        println!("- {}", rec);
    }
    Ok(())
}
