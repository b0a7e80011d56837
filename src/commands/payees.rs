// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let payees = ledger.fetch_payees()?;
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payees)? {
            let data = payees.into_iter().map(|p| vec![p.id, p.name]).collect();
            println!("{}", pretty_table(&["Id", "Payee"], data));
        }
    }
    Ok(())
}
