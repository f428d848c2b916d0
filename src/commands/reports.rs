// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::load_for_session;
use crate::models::{category_name, Theme, Transaction, TransactionType};
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use chrono::Datelike;
use comfy_table::Cell;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(conn: &Connection, theme: &Theme, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("categories", sub)) = m.subcommand() {
        by_category(conn, theme, sub)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryTotal {
    pub key: String,
    pub name: String,
    pub total: Decimal,
    pub total_formatted: String,
    pub percent: String,
}

/// Expenses of one month grouped by category, largest first.
pub fn spend_by_category(
    list: &[Transaction],
    year: i32,
    month: u32,
) -> Result<Vec<CategoryTotal>> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in list.iter().filter(|t| {
        t.r#type == TransactionType::Negative && t.date.year() == year && t.date.month() == month
    }) {
        let entry = agg.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(t.amount)
            .with_context(|| format!("Spending on '{}' is too large to add up", t.category))?;
    }
    let month_total = agg
        .values()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .with_context(|| format!("Spending for {}-{:02} is too large to add up", year, month))?;

    let mut items: Vec<(&str, Decimal)> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let rows = items
        .into_iter()
        .map(|(key, total)| {
            let pct = if month_total.is_zero() {
                Decimal::ZERO
            } else {
                total / month_total * Decimal::ONE_HUNDRED
            };
            CategoryTotal {
                key: key.to_string(),
                name: category_name(key),
                total,
                total_formatted: fmt_money(&total),
                percent: format!("{:.0}%", pct.round_dp(0)),
            }
        })
        .collect();
    Ok(rows)
}

fn by_category(conn: &Connection, theme: &Theme, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let (_, list) = load_for_session(conn)?;
    let data = spend_by_category(&list, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<Cell>> = data
            .iter()
            .map(|c| {
                vec![
                    Cell::new(&c.name),
                    Cell::new(&c.total_formatted).fg(theme.attention.color()),
                    Cell::new(&c.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}
