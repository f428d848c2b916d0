// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user transaction lists kept in a local key-value store.
//!
//! Each user's records live under one key as a serialized JSON array. Reads
//! and writes always move the whole list; there is no partial update.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{Session, Transaction};

pub const DEFAULT_NAMESPACE: &str = "@gofinance";

/// Minimal string key-value storage.
pub trait KeyValue {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn for_user(namespace: &str, user_id: &str) -> Self {
        StoreKey(format!("{}:transactions_user:{}", namespace, user_id))
    }

    pub fn for_session(namespace: &str, session: &Session) -> Self {
        Self::for_user(namespace, &session.id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct TransactionStore<'a, K: KeyValue + ?Sized> {
    storage: &'a K,
}

impl<'a, K: KeyValue + ?Sized> TransactionStore<'a, K> {
    pub fn new(storage: &'a K) -> Self {
        Self { storage }
    }

    pub fn load(&self, key: &StoreKey) -> Result<Vec<Transaction>> {
        let raw = self
            .storage
            .get_item(key.as_str())
            .with_context(|| format!("Failed to read '{}'", key))?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(Vec::new());
        }
        let list: Vec<Transaction> = serde_json::from_str(&raw)
            .with_context(|| format!("Stored value under '{}' is not a transaction list", key))?;
        debug!(key = %key, count = list.len(), "loaded transactions");
        Ok(list)
    }

    pub fn append(&self, key: &StoreKey, record: Transaction) -> Result<()> {
        let mut list = self.load(key)?;
        list.push(record);
        let raw = serde_json::to_string(&list)?;
        self.storage
            .set_item(key.as_str(), &raw)
            .with_context(|| format!("Failed to write '{}'", key))?;
        debug!(key = %key, count = list.len(), "appended transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record(id: &str) -> Transaction {
        Transaction {
            id: id.into(),
            name: "Aluguel".into(),
            amount: Decimal::new(150000, 2),
            r#type: TransactionType::Negative,
            category: "purchases".into(),
            date: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
        }
    }

    #[test]
    fn key_is_user_scoped() {
        let k = StoreKey::for_user(DEFAULT_NAMESPACE, "42");
        assert_eq!(k.as_str(), "@gofinance:transactions_user:42");
    }

    #[test]
    fn missing_key_loads_empty() {
        let kv = MemoryStorage::new();
        let store = TransactionStore::new(&kv);
        let k = StoreKey::for_user(DEFAULT_NAMESPACE, "1");
        assert!(store.load(&k).unwrap().is_empty());
        kv.set_item(k.as_str(), "null").unwrap();
        assert!(store.load(&k).unwrap().is_empty());
    }

    #[test]
    fn append_then_load_grows_by_one() {
        let kv = MemoryStorage::new();
        let store = TransactionStore::new(&kv);
        let k = StoreKey::for_user(DEFAULT_NAMESPACE, "1");
        store.append(&k, record("a")).unwrap();
        let before = store.load(&k).unwrap().len();
        store.append(&k, record("b")).unwrap();
        let after = store.load(&k).unwrap();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last(), Some(&record("b")));
    }

    #[test]
    fn users_are_isolated() {
        let kv = MemoryStorage::new();
        let store = TransactionStore::new(&kv);
        let a = StoreKey::for_user(DEFAULT_NAMESPACE, "a");
        let b = StoreKey::for_user(DEFAULT_NAMESPACE, "b");
        store.append(&a, record("1")).unwrap();
        assert!(store.load(&b).unwrap().is_empty());
    }

    #[test]
    fn corrupt_value_is_an_error() {
        let kv = MemoryStorage::new();
        let k = StoreKey::for_user(DEFAULT_NAMESPACE, "1");
        kv.set_item(k.as_str(), "{not json").unwrap();
        assert!(TransactionStore::new(&kv).load(&k).is_err());
    }
}
