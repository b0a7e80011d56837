// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::CategoryKind;
use crate::ledger::Ledger;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let groups = ledger.fetch_grouped_categories()?;
        if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &groups)? {
            return Ok(());
        }
        let mut data = Vec::new();
        for g in groups {
            let kind = match CategoryKind::for_group(&g) {
                CategoryKind::Investment => "investment",
                CategoryKind::Income => "income",
                _ => "expense",
            };
            for c in g.categories {
                data.push(vec![g.name.clone(), c.name, c.id, kind.to_string()]);
            }
        }
        println!("{}", pretty_table(&["Group", "Category", "Id", "Kind"], data));
    }
    Ok(())
}
