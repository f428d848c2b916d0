// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use gofinance::aggregate::{summarize, DashboardState, NO_TRANSACTIONS};
use gofinance::commands::dashboard;
use gofinance::models::{Session, Theme, Transaction, TransactionType};
use gofinance::store::{KeyValue, StoreKey, TransactionStore, DEFAULT_NAMESPACE};
use gofinance::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn record(id: &str, amount: i64, t: TransactionType, day: u32) -> Transaction {
    Transaction {
        id: id.into(),
        name: id.into(),
        amount: Decimal::new(amount, 0),
        r#type: t,
        category: "purchases".into(),
        date: NaiveDate::from_ymd_opt(2021, 4, day).unwrap(),
    }
}

#[test]
fn refresh_reads_persisted_records() {
    let conn = conn();
    let key = StoreKey::for_user(DEFAULT_NAMESPACE, "u1");
    let store = TransactionStore::new(&conn);
    store
        .append(&key, record("a", 100, TransactionType::Positive, 10))
        .unwrap();
    store
        .append(&key, record("b", 40, TransactionType::Negative, 5))
        .unwrap();

    let mut state = DashboardState::new();
    let snap = state.refresh(&store, &key).unwrap();
    assert_eq!(snap.entries.amount, "R$ 100,00");
    assert_eq!(snap.expenses.amount, "R$ 40,00");
    assert_eq!(snap.total.amount, "R$ 60,00");
    assert!(snap.entries.last_transaction.contains("10 de abril"));
    assert!(snap.expenses.last_transaction.contains("5 de abril"));
}

#[test]
fn fresh_user_sees_sentinels() {
    let conn = conn();
    let key = StoreKey::for_user(DEFAULT_NAMESPACE, "nobody");
    let mut state = DashboardState::new();
    let snap = state
        .refresh(&TransactionStore::new(&conn), &key)
        .unwrap();
    assert_eq!(snap.total.amount, "R$ 0,00");
    assert_eq!(snap.entries.last_transaction, NO_TRANSACTIONS);
    assert_eq!(snap.expenses.last_transaction, NO_TRANSACTIONS);
}

#[test]
fn legacy_values_with_timestamps_still_aggregate() {
    let conn = conn();
    let key = StoreKey::for_user(DEFAULT_NAMESPACE, "u1");
    conn.set_item(
        key.as_str(),
        r#"[{"id":"1","name":"Aluguel","amount":"1500","type":"negative","category":"purchases","date":"2021-04-01T12:00:00.000Z"}]"#,
    )
    .unwrap();
    let mut state = DashboardState::new();
    let snap = state
        .refresh(&TransactionStore::new(&conn), &key)
        .unwrap();
    assert_eq!(snap.expenses.amount, "R$ 1.500,00");
    assert_eq!(snap.total.amount, "-R$ 1.500,00");
    assert_eq!(snap.total.last_transaction, "01 a 1 de abril");
}

fn pedro(photo: Option<&str>) -> Session {
    Session {
        id: "u1".into(),
        name: "Pedro".into(),
        photo: photo.map(String::from),
    }
}

fn run_dashboard(conn: &Connection, extra: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["gofinance", "dashboard"];
    argv.extend_from_slice(extra);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("dashboard", m)) = matches.subcommand() {
        dashboard::handle(conn, &Theme::default(), m)
    } else {
        panic!("no dashboard subcommand");
    }
}

#[test]
fn dashboard_command_requires_sign_in() {
    let conn = conn();
    let err = run_dashboard(&conn, &[]).unwrap_err();
    assert!(err.to_string().contains("Not signed in"));
}

#[test]
fn dashboard_command_renders_for_signed_in_user() {
    let conn = conn();
    db::save_session(&conn, &pedro(None)).unwrap();
    TransactionStore::new(&conn)
        .append(
            &StoreKey::for_user(DEFAULT_NAMESPACE, "u1"),
            record("a", 100, TransactionType::Positive, 10),
        )
        .unwrap();
    run_dashboard(&conn, &[]).unwrap();
    run_dashboard(&conn, &["--json"]).unwrap();
    run_dashboard(&conn, &["--jsonl"]).unwrap();
}

#[test]
fn dashboard_command_surfaces_overflow_instead_of_panicking() {
    let conn = conn();
    db::save_session(&conn, &pedro(None)).unwrap();
    let key = StoreKey::for_user(DEFAULT_NAMESPACE, "u1");
    let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
    let store = TransactionStore::new(&conn);
    for id in ["a", "b"] {
        let mut r = record(id, 0, TransactionType::Positive, 1);
        r.amount = huge;
        store.append(&key, r).unwrap();
    }
    let err = run_dashboard(&conn, &["--json"]).unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn snapshot_json_shape() {
    let snap = summarize(&[
        record("a", 100, TransactionType::Positive, 10),
        record("b", 40, TransactionType::Negative, 5),
    ])
    .unwrap();
    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["entries"]["amount"], "R$ 100,00");
    assert_eq!(v["expenses"]["last_transaction"], "Última saída dia 5 de abril");
    assert_eq!(v["total"]["last_transaction"], "01 a 5 de abril");
    assert_eq!(v["totals"]["total"], "60");
    assert_eq!(v["totals"]["last_entry"], "2021-04-10");
}

#[test]
fn greeting_mentions_photo_only_when_present() {
    assert_eq!(dashboard::greeting(&pedro(None)), "Olá, Pedro");
    assert_eq!(
        dashboard::greeting(&pedro(Some("https://avatars.example/u1"))),
        "Olá, Pedro (https://avatars.example/u1)"
    );
}
