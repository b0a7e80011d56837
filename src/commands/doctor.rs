// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::CategoryIndex;
use crate::ledger::{Ledger, TransactionQuery};
use crate::utils::pretty_table;
use anyhow::Result;

/// Problems found in the ledger, as (issue, detail) pairs.
pub fn check(ledger: &dyn Ledger) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let accounts = ledger.fetch_all_accounts()?;
    let index = CategoryIndex::build(&ledger.fetch_grouped_categories()?);

    for a in &accounts {
        let txs = ledger.fetch_transactions(&TransactionQuery::for_account(&a.id))?;
        for t in txs {
            // 1) Dates we cannot bucket
            if t.date.is_none() {
                rows.push(vec!["unreadable_date".into(), format!("{} ({})", t.id, a.name)]);
            }
            // 2) Category ids that resolve to nothing
            if let Some(cat) = t.category_id.as_deref() {
                if index.get(cat).is_none() {
                    rows.push(vec!["unknown_category".into(), format!("{} -> {}", t.id, cat)]);
                }
            }
        }
    }
    tracing::debug!(accounts = accounts.len(), issues = rows.len(), "doctor finished");
    Ok(rows)
}

pub fn handle(ledger: &dyn Ledger) -> Result<()> {
    let accounts = ledger.fetch_all_accounts()?.len();
    let rows = check(ledger)?;
    if rows.is_empty() {
        println!("✅ doctor: {} account(s), no issues found", accounts);
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
