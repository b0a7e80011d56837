// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::buckets::{report_window, MonthBucket};
use super::category_index::CategoryIndex;
use super::classifier::{Classification, Classifier};
use super::{fetch_scope, scope_accounts};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_MONTHS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlySummaryArgs {
    pub months: usize,
    pub account_id: Option<String>,
}

impl Default for MonthlySummaryArgs {
    fn default() -> Self {
        MonthlySummaryArgs {
            months: DEFAULT_MONTHS,
            account_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub income: i64,
    pub expenses: i64,
    pub investments: i64,
    pub transactions: usize,
}

impl MonthData {
    fn empty(b: MonthBucket) -> Self {
        MonthData {
            year: b.year,
            month: b.month,
            income: 0,
            expenses: 0,
            investments: 0,
            transactions: 0,
        }
    }

    pub fn net(&self) -> i64 {
        self.income
            .saturating_sub(self.expenses)
            .saturating_sub(self.investments)
    }
}

/// Income, expenses and investments for each of the last `months` months
/// ending at `today`'s month.
pub fn monthly_summary(
    ledger: &dyn Ledger,
    args: &MonthlySummaryArgs,
    today: NaiveDate,
) -> Result<Vec<MonthData>> {
    let window = report_window(args.months, today)?;
    let accounts = ledger.fetch_all_accounts()?;
    let scope = scope_accounts(&accounts, args.account_id.as_deref())?;
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return Ok(Vec::new());
    };

    let index = CategoryIndex::build(&ledger.fetch_grouped_categories()?);
    let transactions = fetch_scope(
        ledger,
        &scope,
        Some(first.first_day()),
        Some(last.last_day()),
    )?;
    let classifier = Classifier::new(&index).with_investment_accounts(&accounts);
    Ok(summarize_months(&transactions, &classifier, &window))
}

/// One row per bucket in `window`, in window order, zero-filled.
/// Undated transactions and those outside the window are ignored.
pub fn summarize_months(
    transactions: &[Transaction],
    classifier: &Classifier<'_>,
    window: &[MonthBucket],
) -> Vec<MonthData> {
    let mut rows: Vec<MonthData> = window.iter().map(|b| MonthData::empty(*b)).collect();
    let slots: HashMap<MonthBucket, usize> =
        window.iter().enumerate().map(|(i, b)| (*b, i)).collect();

    let mut skipped = 0usize;
    for t in transactions {
        let Some(date) = t.date else {
            skipped += 1;
            continue;
        };
        let Some(&i) = slots.get(&MonthBucket::of(date)) else {
            continue;
        };
        let c = classifier.classify(t);
        let row = &mut rows[i];
        let slot = match c.class {
            Classification::Income => &mut row.income,
            Classification::Expense => &mut row.expenses,
            Classification::Investment => &mut row.investments,
        };
        *slot = slot.saturating_add(c.magnitude);
        row.transactions += 1;
    }
    if skipped > 0 {
        tracing::debug!(skipped, "monthly summary skipped undated transactions");
    }
    rows
}
