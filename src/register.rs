// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::{find_category, Session, Transaction, TransactionType};
use crate::store::{KeyValue, StoreKey, TransactionStore};
use crate::utils::parse_amount;

/// Largest amount a single record may carry; keeps sums far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 2);

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Nome é obrigatório")]
    MissingName,
    #[error("Valor é obrigatório")]
    MissingAmount,
    #[error("Informe um valor númerico")]
    InvalidAmount,
    #[error("O valor não pode ser negativo")]
    NonPositiveAmount,
    #[error("Selecione o tipo da transação")]
    MissingType,
    #[error("Selecione a categoria")]
    MissingCategory,
    #[error("Não foi possível salvar!")]
    Persist(#[source] anyhow::Error),
}

impl RegisterError {
    /// Validation failures leave nothing half-written and can be fixed by the user.
    pub fn is_validation(&self) -> bool {
        !matches!(self, RegisterError::Persist(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Listing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub amount: String,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn validate(&self) -> Result<(String, Decimal, TransactionType, String), RegisterError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RegisterError::MissingName);
        }
        if self.amount.trim().is_empty() {
            return Err(RegisterError::MissingAmount);
        }
        let amount = parse_amount(&self.amount).map_err(|_| RegisterError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(RegisterError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(RegisterError::InvalidAmount);
        }
        let t = self.transaction_type.ok_or(RegisterError::MissingType)?;
        let category = self
            .category
            .as_deref()
            .and_then(find_category)
            .ok_or(RegisterError::MissingCategory)?;
        Ok((name.to_string(), amount, t, category.key.to_string()))
    }

    /// Validates, persists and resets the form. The form is left untouched
    /// on any error.
    pub fn submit<K: KeyValue + ?Sized>(
        &mut self,
        store: &TransactionStore<'_, K>,
        namespace: &str,
        session: &Session,
        today: NaiveDate,
    ) -> Result<(Transaction, Route), RegisterError> {
        let (name, amount, t, category) = self.validate()?;
        let record = Transaction {
            id: Uuid::new_v4().to_string(),
            name,
            amount,
            r#type: t,
            category,
            date: today,
        };
        let key = StoreKey::for_session(namespace, session);
        if let Err(e) = store.append(&key, record.clone()) {
            error!("failed to save transaction under {}: {:#}", key, e);
            return Err(RegisterError::Persist(e));
        }
        info!(id = %record.id, key = %key, "transaction registered");
        self.reset();
        Ok((record, Route::Listing))
    }
}
