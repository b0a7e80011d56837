// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::category_index::CategoryIndex;
use super::classifier::{Classification, Classifier};
use super::filter::{date_range, TransactionFilter};
use super::{fetch_scope, scope_accounts};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::Transaction;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpendingArgs {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub account_id: Option<String>,
    pub category_name: Option<String>,
    pub payee_name: Option<String>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    /// Income is left out unless asked for.
    pub include_income: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub name: String,
    pub group: String,
    pub is_income: bool,
    pub total: i64,
    pub transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpending {
    pub name: String,
    pub total: i64,
    pub transactions: usize,
    pub categories: Vec<CategorySpending>,
}

pub fn spending_by_category(ledger: &dyn Ledger, args: &SpendingArgs) -> Result<Vec<GroupSpending>> {
    let (start, end) = date_range(args.start_date.as_deref(), args.end_date.as_deref())?;
    let accounts = ledger.fetch_all_accounts()?;
    let scope = scope_accounts(&accounts, args.account_id.as_deref())?;
    let index = CategoryIndex::build(&ledger.fetch_grouped_categories()?);
    let transactions = fetch_scope(ledger, &scope, start, end)?;

    let classifier = Classifier::new(&index).with_investment_accounts(&accounts);
    let filter = TransactionFilter {
        start,
        end,
        category_name: args.category_name.clone(),
        payee_name: args.payee_name.clone(),
        min_amount: args.min_amount,
        max_amount: args.max_amount,
    };
    let groups = aggregate_spending(&transactions, &classifier, &filter, args.include_income);
    tracing::debug!(
        accounts = scope.len(),
        transactions = transactions.len(),
        groups = groups.len(),
        "spending by category"
    );
    Ok(groups)
}

struct GroupAcc {
    name: String,
    categories: BTreeMap<usize, CategorySpending>,
}

/// Groups already-fetched transactions by category and category group.
///
/// Groups and categories are ordered by descending absolute total; ties keep
/// the ledger's category order. Categories with no matching transaction are
/// not emitted.
pub fn aggregate_spending(
    transactions: &[Transaction],
    classifier: &Classifier<'_>,
    filter: &TransactionFilter,
    include_income: bool,
) -> Vec<GroupSpending> {
    let mut groups: BTreeMap<usize, GroupAcc> = BTreeMap::new();

    for t in transactions {
        let c = classifier.classify(t);
        if !filter.matches(t, c.entry) {
            continue;
        }
        if !include_income && c.class == Classification::Income {
            continue;
        }
        let group = groups.entry(c.entry.group_ordinal).or_insert_with(|| GroupAcc {
            name: c.entry.group_name.clone(),
            categories: BTreeMap::new(),
        });
        let cat = group
            .categories
            .entry(c.entry.ordinal)
            .or_insert_with(|| CategorySpending {
                name: c.entry.name.clone(),
                group: c.entry.group_name.clone(),
                is_income: c.entry.is_income,
                total: 0,
                transactions: 0,
            });
        cat.total = cat.total.saturating_add(c.magnitude);
        cat.transactions += 1;
    }

    let mut out: Vec<GroupSpending> = groups
        .into_values()
        .map(|g| {
            let mut categories: Vec<CategorySpending> = g.categories.into_values().collect();
            categories.sort_by_key(|c| Reverse(c.total.unsigned_abs()));
            GroupSpending {
                name: g.name,
                total: categories
                    .iter()
                    .fold(0i64, |acc, c| acc.saturating_add(c.total)),
                transactions: categories.iter().map(|c| c.transactions).sum(),
                categories,
            }
        })
        .collect();
    out.sort_by_key(|g| Reverse(g.total.unsigned_abs()));
    out
}
