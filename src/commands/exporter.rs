// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::load_for_session;
use crate::models::{category_name, Transaction};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::json;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            let (_, list) = load_for_session(conn)?;
            export_transactions(&list, &fmt, out)
        }
        _ => Ok(()),
    }
}

pub fn export_transactions(list: &[Transaction], fmt: &str, out: &str) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record(["id", "date", "name", "type", "amount", "category"])?;
            for t in list {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.name.clone(),
                    t.r#type.as_str().to_string(),
                    t.amount.to_string(),
                    category_name(&t.category),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = list
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date.to_string(), "name": t.name,
                        "type": t.r#type.as_str(), "amount": t.amount.to_string(),
                        "category": category_name(&t.category)
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    info!(count = list.len(), "exported transactions to {}", out);
    println!("Exported {} transactions to {}", list.len(), out);
    Ok(())
}
