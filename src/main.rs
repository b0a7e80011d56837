// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneylens::ledger::LedgerSource;
use moneylens::{cli, commands, db, logging};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_flag("verbose"));

    let source = db::resolve_source(&matches)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let LedgerSource::Sqlite(path) = &source else {
                anyhow::bail!("init needs a SQLite ledger, not a snapshot");
            };
            db::open_or_init(path)?;
            println!("Database initialized at {}", path.display());
        }
        Some(("account", sub)) => source.with_ledger(|l| commands::accounts::handle(l, sub))?,
        Some(("category", sub)) => source.with_ledger(|l| commands::categories::handle(l, sub))?,
        Some(("payee", sub)) => source.with_ledger(|l| commands::payees::handle(l, sub))?,
        Some(("rule", sub)) => source.with_ledger(|l| commands::rules::handle(l, sub))?,
        Some(("tx", sub)) => source.with_ledger(|l| commands::transactions::handle(l, sub))?,
        Some(("report", sub)) => source.with_ledger(|l| commands::reports::handle(l, sub))?,
        Some(("tool", sub)) => source.with_ledger(|l| commands::tools::handle(l, sub))?,
        Some(("doctor", _)) => source.with_ledger(|l| commands::doctor::handle(l))?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
