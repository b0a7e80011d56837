// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::LedgerSource;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneylens", "moneylens"));

pub const DB_ENV: &str = "MONEYLENS_DB";

/// `MONEYLENS_DB` if set, otherwise the platform data dir.
pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneylens.sqlite"))
}

/// Picks the ledger the command will read from: `--snapshot`, then `--db`,
/// then [`db_path`].
pub fn resolve_source(m: &clap::ArgMatches) -> Result<LedgerSource> {
    if let Some(snap) = m.get_one::<String>("snapshot") {
        return Ok(LedgerSource::Snapshot(PathBuf::from(snap.trim())));
    }
    let path = match m.get_one::<String>("db") {
        Some(p) => PathBuf::from(p.trim()),
        None => db_path()?,
    };
    Ok(LedgerSource::Sqlite(path))
}

pub fn open_or_init(path: &PathBuf) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS accounts(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        offbudget INTEGER NOT NULL DEFAULT 0,
        closed INTEGER NOT NULL DEFAULT 0,
        sort_order INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS category_groups(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        is_income INTEGER NOT NULL DEFAULT 0,
        is_savings_or_investment INTEGER NOT NULL DEFAULT 0,
        sort_order INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS categories(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        group_id TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(group_id) REFERENCES category_groups(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS payees(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    );

    -- amounts are integer minor units, negative = outflow
    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        account_id TEXT NOT NULL,
        date TEXT,
        amount INTEGER NOT NULL,
        category_id TEXT,
        payee_id TEXT,
        notes TEXT,
        cleared INTEGER,
        transfer_account_id TEXT,
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );
    -- conditions and actions are JSON arrays
    CREATE TABLE IF NOT EXISTS rules(
        id TEXT PRIMARY KEY,
        stage TEXT,
        conditions_op TEXT NOT NULL DEFAULT 'and',
        conditions TEXT NOT NULL DEFAULT '[]',
        actions TEXT NOT NULL DEFAULT '[]'
    );

    CREATE INDEX IF NOT EXISTS idx_transactions_account_date ON transactions(account_id, date);
    "#,
    )?;
    Ok(())
}
