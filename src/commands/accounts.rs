// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let accounts = ledger.fetch_all_accounts()?;
        if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
            return Ok(());
        }
        let data = accounts
            .into_iter()
            .map(|a| {
                vec![
                    a.id,
                    a.name,
                    fmt_money(a.balance),
                    if a.off_budget { "off" } else { "on" }.to_string(),
                    if a.closed { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Balance", "Budget", "Closed"], data)
        );
    }
    Ok(())
}
