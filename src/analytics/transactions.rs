// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::category_index::CategoryIndex;
use super::filter::{date_range, TransactionFilter};
use crate::error::Result;
use crate::ledger::{find_account, Ledger, TransactionQuery};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionsArgs {
    pub account_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub min_amount: Option<i64>,
    #[serde(default)]
    pub max_amount: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub amount: i64,
    pub category: String,
    pub payee: String,
    pub notes: String,
    pub cleared: bool,
}

/// One account's transactions, newest first, with category and payee names
/// resolved.
pub fn list_transactions(ledger: &dyn Ledger, args: &GetTransactionsArgs) -> Result<Vec<TransactionRow>> {
    let (start, end) = date_range(args.start_date.as_deref(), args.end_date.as_deref())?;
    let accounts = ledger.fetch_all_accounts()?;
    let account = find_account(&accounts, &args.account_id)?;
    let index = CategoryIndex::build(&ledger.fetch_grouped_categories()?);
    let query = TransactionQuery::for_account(&account.id).between(start, end);
    let mut transactions = ledger.fetch_transactions(&query)?;

    let filter = TransactionFilter {
        start,
        end,
        category_name: args.category_name.clone(),
        payee_name: args.payee_name.clone(),
        min_amount: args.min_amount,
        max_amount: args.max_amount,
    };
    transactions.retain(|t| filter.matches(t, index.resolve(t.category_id.as_deref())));
    // stable sort, undated rows last
    transactions.sort_by_key(|t| Reverse(t.date));
    if let Some(limit) = args.limit {
        transactions.truncate(limit);
    }

    Ok(transactions
        .into_iter()
        .map(|t| {
            let entry = index.resolve(t.category_id.as_deref());
            TransactionRow {
                category: entry.name.clone(),
                payee: t.payee_name.unwrap_or_default(),
                notes: t.notes.unwrap_or_default(),
                cleared: t.cleared.unwrap_or(false),
                id: t.id,
                date: t.date,
                amount: t.amount,
            }
        })
        .collect())
}
