// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::RuleCondition;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

fn describe(c: &RuleCondition) -> String {
    match &c.value {
        serde_json::Value::String(s) => format!("{} {} {}", c.field, c.op, s),
        v => format!("{} {} {}", c.field, c.op, v),
    }
}

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let rules = ledger.fetch_rules()?;
        if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rules)? {
            return Ok(());
        }
        let data = rules
            .into_iter()
            .map(|r| {
                let joiner = format!(" {} ", r.conditions_op);
                vec![
                    r.id,
                    r.stage.unwrap_or_default(),
                    r.conditions.iter().map(describe).collect::<Vec<_>>().join(&joiner),
                    r.actions.len().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Stage", "Conditions", "Actions"], data)
        );
    }
    Ok(())
}
