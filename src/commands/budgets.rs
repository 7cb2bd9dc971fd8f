// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::analysis::budget::{
    BucketReport, CategoryReport, MonthlyActuals, analyze_categories, analyze_goals,
};
use crate::commands::transactions::load_all;
use crate::models::{BudgetBucket, BudgetGoal};
use crate::utils::{
    fmt_money, get_budget_goal, get_currency, maybe_print_json, parse_decimal,
    parse_stored_decimal, pretty_table, set_budget_goal, today_or,
};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("goals", sub)) => goals(conn, sub)?,
        Some(("set-goals", sub)) => set_goals(conn, sub)?,
        Some(("analyze", sub)) => analyze(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn goals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goal = get_budget_goal(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goal)? {
        let rows = BudgetBucket::ALL
            .iter()
            .map(|b| vec![b.to_string(), format!("{}%", goal.get(*b))])
            .collect();
        println!("{}", pretty_table(&["Bucket", "Goal"], rows));
    }
    Ok(())
}

fn set_goals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goal = BudgetGoal {
        needs: parse_decimal(sub.get_one::<String>("needs").unwrap())?,
        wants: parse_decimal(sub.get_one::<String>("wants").unwrap())?,
        savings: parse_decimal(sub.get_one::<String>("savings").unwrap())?,
    };
    set_budget_goal(conn, &goal)?;
    tracing::info!(needs = %goal.needs, wants = %goal.wants, savings = %goal.savings, "budget goal saved");
    println!(
        "Budget goal set: needs {}%, wants {}%, savings {}%",
        goal.needs, goal.wants, goal.savings
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalAnalysis {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Decimal,
    pub total_expenses: Decimal,
    pub goal: BudgetGoal,
    pub buckets: BTreeMap<BudgetBucket, BucketReport>,
}

/// Needs/wants/savings analysis of the month containing `today`.
pub fn goal_analysis(conn: &Connection, today: NaiveDate) -> Result<GoalAnalysis> {
    let txs = load_all(conn)?;
    let actuals = MonthlyActuals::collect(&txs, today);
    let goal = get_budget_goal(conn)?;
    let buckets = analyze_goals(&actuals, &goal, actuals.income);
    Ok(GoalAnalysis {
        start: actuals.start,
        end: actuals.end,
        income: actuals.income,
        total_expenses: actuals.total_expenses,
        goal,
        buckets,
    })
}

fn analyze(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today_or(sub.get_one::<String>("today"))?;
    let a = goal_analysis(conn, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &a)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!(
        "{} to {}: income {}, expenses {}",
        a.start,
        a.end,
        fmt_money(&a.income, &ccy),
        fmt_money(&a.total_expenses, &ccy)
    );
    let rows = a
        .buckets
        .iter()
        .map(|(bucket, r)| {
            vec![
                bucket.to_string(),
                format!("{}%", a.goal.get(*bucket)),
                fmt_money(&r.expected, &ccy),
                fmt_money(&r.actual, &ccy),
                fmt_money(&r.difference, &ccy),
                format!("{:.1}%", r.percentage),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Bucket", "Goal", "Expected", "Actual", "Difference", "Of Income"],
            rows
        )
    );
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    set_category_budget(conn, &cat, amount)?;
    println!("Budget set for {} = {}", cat, fmt_money(&amount, &get_currency(conn)?));
    Ok(())
}

pub fn set_category_budget(conn: &Connection, category: &str, amount: Decimal) -> Result<()> {
    if category.is_empty() {
        return Err(anyhow!("Category must not be empty"));
    }
    if amount < Decimal::ZERO {
        return Err(anyhow!("Budget for {} must not be negative", category));
    }
    conn.execute(
        "INSERT INTO category_budgets(category, amount) VALUES (?1, ?2)
         ON CONFLICT(category) DO UPDATE SET amount=excluded.amount",
        params![category, amount.to_string()],
    )?;
    Ok(())
}

pub fn load_category_budgets(conn: &Connection) -> Result<BTreeMap<String, Decimal>> {
    let mut stmt = conn.prepare("SELECT category, amount FROM category_budgets")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = BTreeMap::new();
    for row in rows {
        let (cat, amount_s) = row?;
        out.insert(cat, parse_stored_decimal(&amount_s, "budget amount")?);
    }
    Ok(out)
}

/// Per-category budget report for the month containing `today`.
pub fn category_report(
    conn: &Connection,
    today: NaiveDate,
) -> Result<BTreeMap<String, CategoryReport>> {
    let txs = load_all(conn)?;
    let actuals = MonthlyActuals::collect(&txs, today);
    let goals = load_category_budgets(conn)?;
    Ok(analyze_categories(&actuals.category_spending, &goals))
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today_or(sub.get_one::<String>("today"))?;
    let data = category_report(conn, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|(cat, r)| {
            vec![
                cat.clone(),
                fmt_money(&r.budgeted, &ccy),
                fmt_money(&r.actual, &ccy),
                fmt_money(&r.difference, &ccy),
                r.percentage_used
                    .map(|p| format!("{:.1}%", p))
                    .unwrap_or_else(|| "-".to_string()),
                r.status.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Budget", "Spent", "Remaining", "Used", "Status"],
            rows
        )
    );
    Ok(())
}
