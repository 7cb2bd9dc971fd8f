// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::{BudgetGoal, parse_iso_date};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(parse_iso_date(s)?)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    Decimal::from_str_exact(s).with_context(|| format!("Invalid stored {} '{}'", what, s))
}

/// `--today` when given, the local calendar date otherwise.
pub fn today_or(arg: Option<&String>) -> Result<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    crate::currency::format_amount(*d, ccy)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// Display currency settings
pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| crate::currency::HUB.to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, "currency", ccy)
}

pub fn get_budget_goal(conn: &Connection) -> Result<BudgetGoal> {
    match get_setting(conn, "budget_goal")? {
        Some(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("Invalid stored budget goal '{}'", raw)),
        None => Ok(BudgetGoal::default()),
    }
}

pub fn set_budget_goal(conn: &Connection, goal: &BudgetGoal) -> Result<()> {
    goal.validate()?;
    set_setting(conn, "budget_goal", &serde_json::to_string(goal)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use std::str::FromStr;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn settings_default_and_overwrite() {
        let conn = conn();
        assert_eq!(get_currency(&conn).unwrap(), "USD");
        set_currency(&conn, "INR").unwrap();
        set_currency(&conn, "EUR").unwrap();
        assert_eq!(get_currency(&conn).unwrap(), "EUR");
    }

    #[test]
    fn budget_goal_round_trips_through_settings() {
        let conn = conn();
        assert_eq!(get_budget_goal(&conn).unwrap(), BudgetGoal::default());
        let goal = BudgetGoal {
            needs: Decimal::from_str("55.5").unwrap(),
            wants: Decimal::from_str("24.5").unwrap(),
            savings: Decimal::from(20),
        };
        set_budget_goal(&conn, &goal).unwrap();
        assert_eq!(get_budget_goal(&conn).unwrap(), goal);
    }

    #[test]
    fn invalid_budget_goal_is_not_saved() {
        let conn = conn();
        let goal = BudgetGoal {
            needs: Decimal::from(50),
            wants: Decimal::from(50),
            savings: Decimal::from(50),
        };
        assert!(set_budget_goal(&conn, &goal).is_err());
        assert_eq!(get_budget_goal(&conn).unwrap(), BudgetGoal::default());
    }

    #[test]
    fn parse_helpers_trim_input() {
        assert_eq!(parse_decimal(" 10.50 ").unwrap(), Decimal::from_str("10.50").unwrap());
        assert!(parse_decimal("ten").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert_eq!(
            today_or(Some(&"2025-06-15".to_string())).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
    }
}
