// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategorySet;
use crate::error::FinanceError;
use crate::models::TransactionType;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = kind_of(sub)?;
            let name = add_custom(conn, kind, sub.get_one::<String>("name").unwrap())?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let kind = kind_of(sub)?;
            let name = sub.get_one::<String>("name").unwrap().trim();
            if remove_custom(conn, kind, name)? {
                println!("Removed {} category '{}'", kind, name);
            } else {
                println!("No custom {} category named '{}'", kind, name);
            }
        }
        _ => {}
    }
    Ok(())
}

fn kind_of(sub: &clap::ArgMatches) -> Result<TransactionType> {
    Ok(sub.get_one::<String>("kind").unwrap().parse()?)
}

pub fn load_set(conn: &Connection, kind: TransactionType) -> Result<CategorySet> {
    let mut stmt = conn.prepare("SELECT name FROM categories WHERE kind=?1 ORDER BY id")?;
    let rows = stmt.query_map(params![kind.as_str()], |r| r.get::<_, String>(0))?;
    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(CategorySet::with_custom(kind, names))
}

/// Adds a custom category, rejecting names already used by either type.
pub fn add_custom(conn: &Connection, kind: TransactionType, name: &str) -> Result<String> {
    if load_set(conn, kind.opposite())?.contains(name.trim()) {
        return Err(FinanceError::DuplicateCategory(name.trim().to_string()).into());
    }
    let mut set = load_set(conn, kind)?;
    let name = set.add(name)?;
    conn.execute(
        "INSERT INTO categories(kind, name) VALUES (?1, ?2)",
        params![kind.as_str(), &name],
    )?;
    tracing::info!(%kind, %name, "custom category added");
    Ok(name)
}

pub fn remove_custom(conn: &Connection, kind: TransactionType, name: &str) -> Result<bool> {
    let mut set = load_set(conn, kind)?;
    if !set.remove(name)? {
        return Ok(false);
    }
    conn.execute(
        "DELETE FROM categories WHERE kind=?1 AND name=?2",
        params![kind.as_str(), name.trim()],
    )?;
    Ok(true)
}

#[derive(Serialize)]
struct CategoryRow {
    name: String,
    custom: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let set = load_set(conn, kind_of(sub)?)?;
    let data: Vec<CategoryRow> = set
        .all()
        .into_iter()
        .map(|name| CategoryRow {
            custom: !set.is_default(&name),
            name,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|c| {
                vec![
                    c.name,
                    if c.custom { "custom" } else { "default" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Source"], rows));
    }
    Ok(())
}
