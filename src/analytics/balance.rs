// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::buckets::{report_window, MonthBucket};
use super::monthly::DEFAULT_MONTHS;
use crate::error::Result;
use crate::ledger::{find_account, Ledger, TransactionQuery};
use crate::models::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceHistoryArgs {
    pub account_id: String,
    #[serde(default)]
    pub include_off_budget: bool,
    #[serde(default = "default_months")]
    pub months: usize,
}

fn default_months() -> usize {
    DEFAULT_MONTHS
}

impl BalanceHistoryArgs {
    pub fn new(account_id: &str) -> Self {
        BalanceHistoryArgs {
            account_id: account_id.to_string(),
            include_off_budget: false,
            months: DEFAULT_MONTHS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBalance {
    pub year: i32,
    pub month: u32,
    /// Balance at the end of the month.
    pub balance: i64,
    pub transactions: usize,
}

pub fn balance_history(
    ledger: &dyn Ledger,
    args: &BalanceHistoryArgs,
    today: NaiveDate,
) -> Result<Vec<MonthBalance>> {
    let window = report_window(args.months, today)?;
    let accounts = ledger.fetch_all_accounts()?;
    let account = find_account(&accounts, &args.account_id)?;
    if account.off_budget && !args.include_off_budget {
        // exclusion is a display concern; the history is still produced
        tracing::debug!(account = %account.id, "off-budget account requested without includeOffBudget");
    }

    let Some(first) = window.first() else {
        return Ok(Vec::new());
    };
    // No upper bound: anything dated after the window still has to be
    // unwound from the current balance.
    let query = TransactionQuery::for_account(&account.id).between(Some(first.first_day()), None);
    let transactions = ledger.fetch_transactions(&query)?;
    Ok(reconstruct_balances(account.balance, &transactions, &window))
}

/// Walks back from `current_balance`, newest bucket first, removing each
/// bucket's net delta to reach the balance at the end of the bucket before it.
pub fn reconstruct_balances(
    current_balance: i64,
    transactions: &[Transaction],
    window: &[MonthBucket],
) -> Vec<MonthBalance> {
    let Some(&last) = window.last() else {
        return Vec::new();
    };
    let mut deltas: HashMap<MonthBucket, (i64, usize)> = HashMap::new();
    let mut after_window = 0i64;
    for t in transactions {
        let Some(date) = t.date else {
            continue;
        };
        let b = MonthBucket::of(date);
        if b > last {
            after_window = after_window.saturating_add(t.amount);
        } else {
            let slot = deltas.entry(b).or_insert((0, 0));
            slot.0 = slot.0.saturating_add(t.amount);
            slot.1 += 1;
        }
    }

    let mut running = current_balance.saturating_sub(after_window);
    let mut out = Vec::with_capacity(window.len());
    for b in window.iter().rev() {
        let (delta, count) = deltas.get(b).copied().unwrap_or((0, 0));
        out.push(MonthBalance {
            year: b.year,
            month: b.month,
            balance: running,
            transactions: count,
        });
        running = running.saturating_sub(delta);
    }
    out.reverse();
    out
}
