// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{get_namespace, require_session};
use crate::models::{category_name, Session, Theme, Transaction, TransactionType};
use crate::register::{RegisterForm, Route};
use crate::store::{StoreKey, TransactionStore};
use crate::utils::{fmt_money, fmt_short_date, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Local;
use comfy_table::Cell;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, theme: &Theme, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, theme, sub)?,
        Some(("list", sub)) => list(conn, theme, sub)?,
        _ => {}
    }
    Ok(())
}

/// The signed-in user's records, oldest first as stored.
pub fn load_for_session(conn: &Connection) -> Result<(Session, Vec<Transaction>)> {
    let session = require_session(conn)?;
    let key = StoreKey::for_session(&get_namespace(conn)?, &session);
    let list = TransactionStore::new(conn).load(&key)?;
    Ok((session, list))
}

fn add(conn: &Connection, theme: &Theme, sub: &clap::ArgMatches) -> Result<()> {
    let session = require_session(conn)?;
    let namespace = get_namespace(conn)?;
    let mut form = RegisterForm {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        transaction_type: sub
            .get_one::<String>("type")
            .and_then(|s| TransactionType::parse(s)),
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
    };
    let store = TransactionStore::new(conn);
    let (record, route) = form.submit(&store, &namespace, &session, Local::now().date_naive())?;
    println!(
        "Recorded {} '{}' ({})",
        fmt_money(&record.amount),
        record.name,
        category_name(&record.category)
    );
    match route {
        Route::Listing => {
            let list = store.load(&StoreKey::for_session(&namespace, &session))?;
            print_rows(theme, &query_rows(&list, Some(10)));
        }
    }
    Ok(())
}

fn list(conn: &Connection, theme: &Theme, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (_, list) = load_for_session(conn)?;
    let data = query_rows(&list, sub.get_one::<usize>("limit").copied());
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_rows(theme, &data);
    }
    Ok(())
}

fn print_rows(theme: &Theme, data: &[TransactionRow]) {
    let rows: Vec<Vec<Cell>> = data
        .iter()
        .map(|r| {
            vec![
                Cell::new(&r.name),
                Cell::new(&r.amount).fg(theme.polarity(r.r#type).color()),
                Cell::new(&r.category),
                Cell::new(&r.date),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Amount", "Category", "Date"], rows));
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub r#type: TransactionType,
    pub category: String,
    pub date: String,
}

/// Newest first; records from the same day keep most-recently-added first.
pub fn query_rows(list: &[Transaction], limit: Option<usize>) -> Vec<TransactionRow> {
    let mut sorted: Vec<&Transaction> = list.iter().rev().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| {
            let amount = match t.r#type {
                TransactionType::Positive => fmt_money(&t.amount),
                TransactionType::Negative => format!("- {}", fmt_money(&t.amount)),
            };
            TransactionRow {
                id: t.id.clone(),
                name: t.name.clone(),
                amount,
                r#type: t.r#type,
                category: category_name(&t.category),
                date: fmt_short_date(t.date),
            }
        })
        .collect()
}
