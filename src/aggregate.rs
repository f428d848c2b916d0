// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard totals.
//!
//! `summarize` is a pure function of the transaction list and is recomputed
//! from scratch on every dashboard refresh. Nothing here is persisted.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Transaction, TransactionType};
use crate::store::{KeyValue, StoreKey, TransactionStore};
use crate::utils::{fmt_day_of_month, fmt_money};

pub const NO_TRANSACTIONS: &str = "Não há transações";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightCard {
    pub amount: String,
    pub last_transaction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub entries: Decimal,
    pub expenses: Decimal,
    pub total: Decimal,
    pub last_entry: Option<NaiveDate>,
    pub last_expense: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub entries: HighlightCard,
    pub expenses: HighlightCard,
    pub total: HighlightCard,
    pub totals: Totals,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("dashboard snapshot is missing the {0} bucket")]
    Missing(&'static str),
    #[error("{0} total is too large to add up")]
    Overflow(&'static str),
}

#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    entries: Option<(Decimal, Option<NaiveDate>)>,
    expenses: Option<(Decimal, Option<NaiveDate>)>,
    total: Option<Decimal>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(mut self, sum: Decimal, last: Option<NaiveDate>) -> Self {
        self.entries = Some((sum, last));
        self
    }

    pub fn expenses(mut self, sum: Decimal, last: Option<NaiveDate>) -> Self {
        self.expenses = Some((sum, last));
        self
    }

    pub fn total(mut self, total: Decimal) -> Self {
        self.total = Some(total);
        self
    }

    pub fn build(self) -> Result<Snapshot, SnapshotError> {
        let (entries, last_entry) = self.entries.ok_or(SnapshotError::Missing("entries"))?;
        let (expenses, last_expense) = self.expenses.ok_or(SnapshotError::Missing("expenses"))?;
        let total = self.total.ok_or(SnapshotError::Missing("total"))?;

        // The total card's interval ends at the last expense, not the last entry.
        let interval = last_expense
            .map(|d| format!("01 a {}", fmt_day_of_month(d)))
            .unwrap_or_else(|| NO_TRANSACTIONS.to_string());

        Ok(Snapshot {
            entries: HighlightCard {
                amount: fmt_money(&entries),
                last_transaction: last_phrase("Última entrada dia", last_entry),
            },
            expenses: HighlightCard {
                amount: fmt_money(&expenses),
                last_transaction: last_phrase("Última saída dia", last_expense),
            },
            total: HighlightCard {
                amount: fmt_money(&total),
                last_transaction: interval,
            },
            totals: Totals {
                entries,
                expenses,
                total,
                last_entry,
                last_expense,
            },
        })
    }
}

fn last_phrase(prefix: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{} {}", prefix, fmt_day_of_month(d)),
        None => NO_TRANSACTIONS.to_string(),
    }
}

fn sum_of(
    list: &[Transaction],
    t: TransactionType,
    bucket: &'static str,
) -> Result<Decimal, SnapshotError> {
    list.iter()
        .filter(|r| r.r#type == t)
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.amount))
        .ok_or(SnapshotError::Overflow(bucket))
}

fn last_date_of(list: &[Transaction], t: TransactionType) -> Option<NaiveDate> {
    list.iter().filter(|r| r.r#type == t).map(|r| r.date).max()
}

pub fn summarize(list: &[Transaction]) -> Result<Snapshot, SnapshotError> {
    let entries = sum_of(list, TransactionType::Positive, "entries")?;
    let expenses = sum_of(list, TransactionType::Negative, "expenses")?;
    let total = entries
        .checked_sub(expenses)
        .ok_or(SnapshotError::Overflow("total"))?;
    SnapshotBuilder::new()
        .entries(entries, last_date_of(list, TransactionType::Positive))
        .expenses(expenses, last_date_of(list, TransactionType::Negative))
        .total(total)
        .build()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTicket(u64);

/// Holds the latest snapshot for a dashboard and drops results that arrive
/// after the dashboard lost focus or was refocused.
#[derive(Debug, Default)]
pub struct DashboardState {
    generation: u64,
    focused: bool,
    snapshot: Option<Snapshot>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self) -> FocusTicket {
        self.generation += 1;
        self.focused = true;
        FocusTicket(self.generation)
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_current(&self, ticket: FocusTicket) -> bool {
        self.focused && ticket.0 == self.generation
    }

    /// Returns whether the snapshot was accepted.
    pub fn apply(&mut self, ticket: FocusTicket, snapshot: Snapshot) -> bool {
        if !self.is_current(ticket) {
            warn!(ticket = ticket.0, current = self.generation, "dropping stale dashboard snapshot");
            return false;
        }
        self.snapshot = Some(snapshot);
        true
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Focuses, reloads and recomputes in one step, so the result is always current.
    pub fn refresh<K: KeyValue + ?Sized>(
        &mut self,
        store: &TransactionStore<'_, K>,
        key: &StoreKey,
    ) -> Result<&Snapshot> {
        self.focus();
        let list = store.load(key)?;
        let snapshot = summarize(&list)?;
        debug!(records = list.len(), "dashboard recomputed");
        let current: &Snapshot = self.snapshot.insert(snapshot);
        Ok(current)
    }
}
