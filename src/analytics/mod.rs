// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregations over the ledger's transactions: spending by category, monthly
//! summaries and balance histories.
//!
//! Every report is computed from scratch on each call. Amounts are integer
//! minor units throughout.

pub mod balance;
pub mod buckets;
pub mod category_index;
pub mod classifier;
pub mod filter;
pub mod monthly;
pub mod spending;
pub mod transactions;

pub use balance::{balance_history, BalanceHistoryArgs, MonthBalance};
pub use buckets::{bucket_of, month_window, report_window, MonthBucket, MAX_MONTHS};
pub use category_index::{CategoryEntry, CategoryIndex, CategoryKind, UNCATEGORIZED};
pub use classifier::{Classification, Classified, Classifier};
pub use filter::TransactionFilter;
pub use monthly::{monthly_summary, MonthData, MonthlySummaryArgs};
pub use spending::{spending_by_category, CategorySpending, GroupSpending, SpendingArgs};
pub use transactions::{list_transactions, GetTransactionsArgs, TransactionRow};

use crate::error::Result;
use crate::ledger::{find_account, Ledger, TransactionQuery};
use crate::models::{Account, Transaction};
use chrono::NaiveDate;

/// Accounts a report covers: the named one, or every open on-budget account.
pub(crate) fn scope_accounts<'a>(
    accounts: &'a [Account],
    account_id: Option<&str>,
) -> Result<Vec<&'a Account>> {
    match account_id {
        Some(id) => Ok(vec![find_account(accounts, id)?]),
        None => Ok(accounts
            .iter()
            .filter(|a| !a.off_budget && !a.closed)
            .collect()),
    }
}

pub(crate) fn fetch_scope(
    ledger: &dyn Ledger,
    accounts: &[&Account],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<Transaction>> {
    let mut out = Vec::new();
    for a in accounts {
        let query = TransactionQuery::for_account(&a.id).between(start, end);
        out.extend(ledger.fetch_transactions(&query)?);
    }
    Ok(out)
}
