// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gofinance::models::{Session, Theme};
use gofinance::store::{StoreKey, TransactionStore, DEFAULT_NAMESPACE};
use gofinance::{cli, commands::reports, db};
use rusqlite::Connection;
use serde_json::json;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    db::save_session(
        &conn,
        &Session {
            id: "u1".into(),
            name: "Pedro".into(),
            photo: None,
        },
    )
    .unwrap();
    let record = serde_json::from_value(json!({
        "id": "t1", "name": "Aluguel de casa", "amount": "1500",
        "type": "negative", "category": "purchases", "date": "2021-04-01"
    }))
    .unwrap();
    TransactionStore::new(&conn)
        .append(&StoreKey::for_user(DEFAULT_NAMESPACE, "u1"), record)
        .unwrap();
    conn
}

fn run_report(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["gofinance", "report", "categories"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("report", report_m)) = matches.subcommand() {
        reports::handle(conn, &Theme::default(), report_m)
    } else {
        panic!("no report subcommand");
    }
}

#[test]
fn categories_report_accepts_month() {
    let conn = setup();
    run_report(&conn, &["--month", "2021-04"]).unwrap();
    run_report(&conn, &["--month", " 2021-04 ", "--json"]).unwrap();
}

#[test]
fn categories_report_rejects_bad_month() {
    let conn = setup();
    let err = run_report(&conn, &["--month", "2021-13"]).unwrap_err();
    assert!(err.to_string().contains("Invalid month"));
    assert!(run_report(&conn, &["--month", "abril"]).is_err());
}

#[test]
fn categories_report_requires_sign_in() {
    let conn = setup();
    db::clear_session(&conn).unwrap();
    assert!(run_report(&conn, &["--month", "2021-04"]).is_err());
}
