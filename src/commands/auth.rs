// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{clear_session, load_session, save_session};
use crate::models::Session;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let session = Session {
                id: sub.get_one::<String>("id").unwrap().trim().to_string(),
                name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                photo: sub.get_one::<String>("photo").map(|s| s.trim().to_string()),
            };
            if session.id.is_empty() {
                anyhow::bail!("User id cannot be empty");
            }
            save_session(conn, &session)?;
            info!(user = %session.id, "signed in");
            println!("Olá, {}", session.name);
        }
        Some(("logout", _)) => {
            clear_session(conn)?;
            info!("signed out");
            println!("Signed out");
        }
        Some(("whoami", _)) => match load_session(conn)? {
            Some(s) => {
                let rows = vec![vec![s.id, s.name, s.photo.unwrap_or_default()]];
                println!("{}", pretty_table(&["Id", "Name", "Photo"], rows));
            }
            None => println!("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}
