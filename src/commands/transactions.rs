// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{list_transactions, GetTransactionsArgs};
use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(ledger, sub)?;
    }
    Ok(())
}

fn list(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = list_transactions(ledger, &query_args(sub))?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.map(|d| d.to_string()).unwrap_or_default(),
                    r.payee.clone(),
                    fmt_money(r.amount),
                    r.category.clone(),
                    if r.cleared { "✓" } else { "" }.to_string(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Payee", "Amount", "Category", "Cleared", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_args(sub: &clap::ArgMatches) -> GetTransactionsArgs {
    let s = |k: &str| sub.get_one::<String>(k).map(|v| v.trim().to_string());
    GetTransactionsArgs {
        account_id: s("account").unwrap_or_default(),
        start_date: s("start"),
        end_date: s("end"),
        min_amount: sub.get_one::<i64>("min").copied(),
        max_amount: sub.get_one::<i64>("max").copied(),
        category_name: s("category"),
        payee_name: s("payee"),
        limit: sub.get_one::<usize>("limit").copied(),
    }
}
