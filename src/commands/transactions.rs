// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::categories::load_set;
use crate::models::{BudgetBucket, NewTransaction, Transaction, TransactionType};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, parse_stored_decimal,
    pretty_table, today_or,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, Row, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => today_or(None)?,
    };
    let bucket = sub
        .get_one::<String>("bucket")
        .map(|s| s.parse::<BudgetBucket>())
        .transpose()?;
    let new = NewTransaction {
        kind,
        category: sub.get_one::<String>("category").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        label: sub.get_one::<String>("label").unwrap().trim().to_string(),
        date,
        bucket,
        receipt: sub
            .get_one::<String>("receipt")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    let tx = insert(conn, new)?;
    let ccy = get_currency(conn)?;
    println!(
        "Recorded {} {} '{}' ({}) on {} [id {}]",
        tx.kind,
        fmt_money(&tx.amount, &ccy),
        tx.label,
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

/// Validates and stores a transaction, returning it with its new id.
pub fn insert(conn: &Connection, new: NewTransaction) -> Result<Transaction> {
    new.validate()?;
    let categories = load_set(conn, new.kind)?;
    if !categories.contains(new.category.trim()) {
        tracing::warn!(
            category = %new.category,
            kind = %new.kind,
            "category is not in the configured set"
        );
    }
    conn.execute(
        "INSERT INTO transactions(type, category, amount, label, date, bucket, receipt)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.kind.as_str(),
            new.category.trim(),
            new.amount.to_string(),
            new.label.trim(),
            new.date.to_string(),
            new.bucket.map(|b| b.as_str()),
            new.receipt,
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, kind = %new.kind, amount = %new.amount, "transaction recorded");
    Ok(new.into_transaction(id)?)
}

pub fn replace_amounts(conn: &Connection, transactions: &[Transaction]) -> Result<()> {
    let mut stmt = conn.prepare("UPDATE transactions SET amount=?1 WHERE id=?2")?;
    for t in transactions {
        stmt.execute(params![t.amount.to_string(), t.id])?;
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !delete(conn, id)? {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}

const SELECT: &str =
    "SELECT id, type, category, amount, label, date, bucket, receipt FROM transactions";

fn from_row(r: &Row<'_>) -> Result<Transaction> {
    let id: i64 = r.get(0)?;
    let kind_s: String = r.get(1)?;
    let amount_s: String = r.get(3)?;
    let date_s: String = r.get(5)?;
    let bucket_s: Option<String> = r.get(6)?;
    Ok(Transaction {
        id,
        kind: kind_s
            .parse::<TransactionType>()
            .with_context(|| format!("Invalid stored type for transaction {}", id))?,
        category: r.get(2)?,
        amount: parse_stored_decimal(&amount_s, "amount")?,
        label: r.get(4)?,
        date: parse_date(&date_s)
            .with_context(|| format!("Invalid stored date for transaction {}", id))?,
        bucket: bucket_s.map(|b| b.parse::<BudgetBucket>()).transpose()?,
        receipt: r.get(7)?,
    })
}

pub fn load_all(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY date, id", SELECT))?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(from_row(r)?);
    }
    Ok(out)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut sql = format!("{} WHERE 1=1", SELECT);
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.trim().into());
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        sql.push_str(" AND type=?");
        params_vec.push(kind.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.trim().into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(from_row(r)?);
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.label.clone(),
                    fmt_money(&t.amount, &ccy),
                    t.bucket.map(|b| b.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Label", "Amount", "Bucket"],
                rows,
            )
        );
    }
    Ok(())
}
