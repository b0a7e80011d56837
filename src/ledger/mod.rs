// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger collaborator: the read API the analytics core pulls accounts,
//! transactions and categories from.
//!
//! A ledger handle is opened for a single query through
//! [`LedgerSource::with_ledger`] and dropped as soon as the query finishes.

mod memory;
mod sqlite;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;

use crate::error::{AnalyticsError, Result};
use crate::models::{Account, CategoryGroup, Payee, Rule, Transaction};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Transactions of one account, optionally bounded by date (both ends inclusive).
///
/// Records whose date cannot be read are returned regardless of the bounds so
/// that the caller decides how to treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub account_id: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionQuery {
    pub fn for_account(account_id: &str) -> Self {
        TransactionQuery {
            account_id: account_id.to_string(),
            start: None,
            end: None,
        }
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        let Some(d) = date else {
            return true;
        };
        self.start.is_none_or(|s| d >= s) && self.end.is_none_or(|e| d <= e)
    }
}

pub trait Ledger {
    fn fetch_all_accounts(&self) -> Result<Vec<Account>>;
    fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;
    fn fetch_grouped_categories(&self) -> Result<Vec<CategoryGroup>>;
    fn fetch_payees(&self) -> Result<Vec<Payee>>;
    fn fetch_rules(&self) -> Result<Vec<Rule>>;
}

/// Where a ledger session is opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSource {
    Sqlite(PathBuf),
    Snapshot(PathBuf),
}

impl LedgerSource {
    pub fn open(&self) -> Result<Box<dyn Ledger>> {
        match self {
            LedgerSource::Sqlite(path) => Ok(Box::new(SqliteLedger::open(path)?)),
            LedgerSource::Snapshot(path) => Ok(Box::new(MemoryLedger::from_path(path)?)),
        }
    }

    /// Runs `f` against a freshly opened ledger and tears the session down
    /// afterwards, whether or not `f` succeeded.
    pub fn with_ledger<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&dyn Ledger) -> std::result::Result<T, E>,
        E: From<AnalyticsError>,
    {
        let ledger = self.open()?;
        tracing::debug!(source = ?self, "ledger session opened");
        let out = f(ledger.as_ref());
        drop(ledger);
        tracing::debug!("ledger session closed");
        out
    }
}

/// Looks an account up by id in an already fetched account list.
pub fn find_account<'a>(accounts: &'a [Account], id: &str) -> Result<&'a Account> {
    accounts
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AnalyticsError::account_not_found(id))
}
