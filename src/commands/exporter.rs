// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use crate::commands::transactions::load_all;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            let n = export_transactions(conn, &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes every transaction, oldest first. Returns the number written.
pub fn export_transactions(conn: &Connection, fmt: &str, out: &Path) -> Result<usize> {
    let txs = load_all(conn)?;
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "type", "category", "label", "amount", "bucket", "receipt",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.label.clone(),
                    t.amount.to_string(),
                    t.bucket.map(|b| b.to_string()).unwrap_or_default(),
                    t.receipt.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => std::fs::write(out, serde_json::to_string_pretty(&txs)?)?,
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    tracing::info!(count = txs.len(), path = %out.display(), "transactions exported");
    Ok(txs.len())
}
