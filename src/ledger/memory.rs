// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ledger, TransactionQuery};
use crate::error::{AnalyticsError, Result};
use crate::models::{Account, CategoryGroup, Payee, Rule, Transaction};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A ledger held entirely in memory, loadable from a JSON snapshot.
///
/// Account balances are taken as given; they are not recomputed from the
/// transaction list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryLedger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub category_groups: Vec<CategoryGroup>,
    #[serde(default)]
    pub payees: Vec<Payee>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl MemoryLedger {
    pub fn new(
        accounts: Vec<Account>,
        category_groups: Vec<CategoryGroup>,
        transactions: Vec<Transaction>,
    ) -> Self {
        MemoryLedger {
            accounts,
            category_groups,
            payees: Vec::new(),
            transactions,
            rules: Vec::new(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::Upstream(format!("Read snapshot {}: {}", path.display(), e))
        })?;
        let ledger: MemoryLedger = serde_json::from_str(&raw).map_err(|e| {
            AnalyticsError::Upstream(format!("Parse snapshot {}: {}", path.display(), e))
        })?;
        tracing::debug!(
            accounts = ledger.accounts.len(),
            transactions = ledger.transactions.len(),
            "loaded ledger snapshot"
        );
        Ok(ledger)
    }
}

impl Ledger for MemoryLedger {
    fn fetch_all_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.account_id == query.account_id && query.admits(t.date))
            .cloned()
            .collect())
    }

    fn fetch_grouped_categories(&self) -> Result<Vec<CategoryGroup>> {
        Ok(self.category_groups.clone())
    }

    fn fetch_payees(&self) -> Result<Vec<Payee>> {
        Ok(self.payees.clone())
    }

    fn fetch_rules(&self) -> Result<Vec<Rule>> {
        Ok(self.rules.clone())
    }
}
