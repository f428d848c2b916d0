// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{DashboardState, HighlightCard};
use crate::db::{get_namespace, require_session};
use crate::models::{Rgb, Session, Theme};
use crate::store::{StoreKey, TransactionStore};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use comfy_table::Cell;
use rusqlite::Connection;

pub fn handle(conn: &Connection, theme: &Theme, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let session = require_session(conn)?;
    let key = StoreKey::for_session(&get_namespace(conn)?, &session);

    let mut state = DashboardState::new();
    let snapshot = state.refresh(&TransactionStore::new(conn), &key)?;

    if !maybe_print_json(json_flag, jsonl_flag, snapshot)? {
        println!("{}", greeting(&session));
        let cards: [(&str, &HighlightCard, Rgb); 3] = [
            ("Entradas", &snapshot.entries, theme.success),
            ("Saídas", &snapshot.expenses, theme.attention),
            ("Total", &snapshot.total, theme.secondary),
        ];
        let rows: Vec<Vec<Cell>> = cards
            .iter()
            .map(|(title, card, color)| {
                vec![
                    Cell::new(*title).fg(theme.title.color()),
                    Cell::new(&card.amount).fg(color.color()),
                    Cell::new(&card.last_transaction).fg(theme.text.color()),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Amount", "Last transaction"], rows));
    }
    Ok(())
}

pub fn greeting(session: &Session) -> String {
    match &session.photo {
        Some(photo) => format!("Olá, {} ({})", session.name, photo),
        None => format!("Olá, {}", session.name),
    }
}
