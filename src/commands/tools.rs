// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::tools::ToolRegistry;
use crate::utils::pretty_table;
use anyhow::{Context, Result};

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    let registry = ToolRegistry::with_read_tools();
    match m.subcommand() {
        Some(("list", _)) => {
            let data = registry
                .list()
                .into_iter()
                .map(|(n, d)| vec![n.to_string(), d.to_string()])
                .collect();
            println!("{}", pretty_table(&["Tool", "Description"], data));
        }
        Some(("call", sub)) => {
            let out = call(ledger, &registry, sub)?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {}
    }
    Ok(())
}

pub fn call(
    ledger: &dyn Ledger,
    registry: &ToolRegistry,
    sub: &clap::ArgMatches,
) -> Result<serde_json::Value> {
    let name = sub.get_one::<String>("name").map(|s| s.trim()).unwrap_or_default();
    let raw = sub.get_one::<String>("args").map(|s| s.as_str()).unwrap_or("{}");
    let args: serde_json::Value = serde_json::from_str(raw)
        .with_context(|| format!("Invalid JSON arguments for {}: {}", name, raw))?;
    let today = chrono::Local::now().date_naive();
    Ok(registry.invoke(ledger, name, args, today)?)
}
