// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::category_index::{CategoryEntry, CategoryIndex, CategoryKind};
use crate::models::{Account, Transaction};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Income,
    Expense,
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub class: Classification,
    /// Expenses and investments are absolute values; income keeps its sign.
    pub magnitude: i64,
    pub entry: &'a CategoryEntry,
}

/// Labels transactions as income, expense or investment.
pub struct Classifier<'a> {
    index: &'a CategoryIndex,
    investment_accounts: HashSet<&'a str>,
}

impl<'a> Classifier<'a> {
    pub fn new(index: &'a CategoryIndex) -> Self {
        Classifier {
            index,
            investment_accounts: HashSet::new(),
        }
    }

    /// Transfers into any open off-budget account in `accounts` count as
    /// investment.
    pub fn with_investment_accounts(mut self, accounts: &'a [Account]) -> Self {
        self.investment_accounts = accounts
            .iter()
            .filter(|a| a.off_budget && !a.closed)
            .map(|a| a.id.as_str())
            .collect();
        self
    }

    pub fn index(&self) -> &'a CategoryIndex {
        self.index
    }

    pub fn classify(&self, t: &Transaction) -> Classified<'a> {
        let entry = self.index.resolve(t.category_id.as_deref());
        let into_investment = t
            .transfer_account_id
            .as_deref()
            .is_some_and(|id| self.investment_accounts.contains(id));

        let (class, magnitude) = if entry.kind == CategoryKind::Investment || into_investment {
            (Classification::Investment, t.amount.saturating_abs())
        } else if entry.kind == CategoryKind::Income || t.amount >= 0 {
            (Classification::Income, t.amount)
        } else {
            (Classification::Expense, t.amount.saturating_abs())
        };
        Classified {
            class,
            magnitude,
            entry,
        }
    }
}
