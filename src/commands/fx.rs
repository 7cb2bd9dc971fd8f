// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{investments, transactions};
use crate::currency;
use crate::utils::{get_currency, parse_decimal, pretty_table, set_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", _)) => {
            let ccy = get_currency(conn)?;
            println!("{} ({})", ccy, currency::symbol(&ccy));
        }
        Some(("set-currency", sub)) => {
            let target = sub.get_one::<String>("CURRENCY").unwrap();
            let convert = !sub.get_flag("keep-amounts");
            let (from, to) = change_currency(conn, target, convert)?;
            if from == to {
                println!("Currency already {}", to);
            } else if convert {
                println!("Currency changed {} -> {}; stored amounts converted", from, to);
            } else {
                println!("Currency changed {} -> {}; amounts left as is", from, to);
            }
        }
        Some(("convert", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let from = currency::normalize(sub.get_one::<String>("from").unwrap())?;
            let to = currency::normalize(sub.get_one::<String>("to").unwrap())?;
            let out = currency::convert(amount, &from, &to)?;
            println!("{} {} -> {:.4} {}", amount, from, out, to);
        }
        Some(("rates", _)) => rates(),
        _ => {}
    }
    Ok(())
}

/// Switches the display currency. With `convert`, every stored transaction
/// and investment amount is re-denominated in one database transaction.
/// Returns the previous and new currency codes.
pub fn change_currency(
    conn: &mut Connection,
    target: &str,
    convert: bool,
) -> Result<(String, String)> {
    let to = currency::normalize(target)?;
    let from = get_currency(conn)?;
    if from == to {
        return Ok((from, to));
    }
    let tx = conn.transaction()?;
    if convert {
        let txs = currency::convert_transactions(&transactions::load_all(&tx)?, &from, &to)?;
        transactions::replace_amounts(&tx, &txs)?;
        let invs = currency::convert_investments(&investments::load_all(&tx)?, &from, &to)?;
        investments::replace_amounts(&tx, &invs)?;
        tracing::info!(
            %from,
            %to,
            transactions = txs.len(),
            investments = invs.len(),
            "stored amounts converted"
        );
    }
    set_currency(&tx, &to)?;
    tx.commit()?;
    Ok((from, to))
}

fn rates() {
    let rows = currency::supported()
        .into_iter()
        .filter_map(|code| {
            currency::rate(currency::HUB, code)
                .ok()
                .map(|r| vec![code.to_string(), currency::symbol(code).to_string(), r.to_string()])
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Currency", "Symbol", &format!("Per 1 {}", currency::HUB)], rows)
    );
}
