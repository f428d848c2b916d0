// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::models::Session;
use crate::store::{KeyValue, DEFAULT_NAMESPACE};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.gofinance", "GoFinance", "gofinance"));

pub const DB_ENV: &str = "GOFINANCE_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("gofinance.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    debug!("opening database at {}", path.display());
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS kv_store(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl KeyValue for Connection {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let v = self
            .query_row("SELECT value FROM kv_store WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.execute(
            "INSERT INTO kv_store(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
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

pub fn get_namespace(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "namespace")?.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()))
}

pub fn load_session(conn: &Connection) -> Result<Option<Session>> {
    match get_setting(conn, "session")? {
        Some(raw) => {
            let s = serde_json::from_str(&raw).context("Stored session is unreadable")?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

pub fn require_session(conn: &Connection) -> Result<Session> {
    load_session(conn)?.context("Not signed in; run `gofinance auth login` first")
}

pub fn save_session(conn: &Connection, session: &Session) -> Result<()> {
    set_setting(conn, "session", &serde_json::to_string(session)?)
}

pub fn clear_session(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='session'", [])?;
    Ok(())
}
