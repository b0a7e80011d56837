// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{
    balance_history, monthly_summary, spending_by_category, BalanceHistoryArgs,
    MonthlySummaryArgs, SpendingArgs,
};
use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, write_csv};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

pub fn handle(ledger: &dyn Ledger, m: &clap::ArgMatches) -> Result<()> {
    handle_at(ledger, m, chrono::Local::now().date_naive())
}

/// Same as [`handle`] with the month window anchored at `today`.
pub fn handle_at(ledger: &dyn Ledger, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("spending", sub)) => spending(ledger, sub)?,
        Some(("monthly", sub)) => monthly(ledger, sub, today)?,
        Some(("balance-history", sub)) => balances(ledger, sub, today)?,
        _ => {}
    }
    Ok(())
}

fn opt(sub: &clap::ArgMatches, key: &str) -> Option<String> {
    sub.get_one::<String>(key).map(|s| s.trim().to_string())
}

pub fn spending_args(sub: &clap::ArgMatches) -> SpendingArgs {
    SpendingArgs {
        start_date: opt(sub, "start"),
        end_date: opt(sub, "end"),
        account_id: opt(sub, "account"),
        include_income: sub.get_flag("income"),
        ..SpendingArgs::default()
    }
}

pub fn monthly_args(sub: &clap::ArgMatches) -> MonthlySummaryArgs {
    MonthlySummaryArgs {
        months: *sub.get_one::<usize>("months").unwrap_or(&3),
        account_id: opt(sub, "account"),
    }
}

pub fn balance_args(sub: &clap::ArgMatches) -> BalanceHistoryArgs {
    BalanceHistoryArgs {
        account_id: opt(sub, "account").unwrap_or_default(),
        include_off_budget: sub.get_flag("include-off-budget"),
        months: *sub.get_one::<usize>("months").unwrap_or(&3),
    }
}

fn emit(sub: &clap::ArgMatches, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
    if let Some(path) = sub.get_one::<String>("csv") {
        write_csv(Path::new(path.trim()), headers, &rows)?;
        tracing::debug!(path = %path.trim(), rows = rows.len(), "wrote report CSV");
    }
    println!("{}", pretty_table(headers, rows));
    Ok(())
}

fn spending(ledger: &dyn Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let groups = spending_by_category(ledger, &spending_args(sub))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &groups)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for g in &groups {
        rows.push(vec![
            g.name.clone(),
            String::new(),
            fmt_money(g.total),
            g.transactions.to_string(),
        ]);
        for c in &g.categories {
            rows.push(vec![
                String::new(),
                c.name.clone(),
                fmt_money(c.total),
                c.transactions.to_string(),
            ]);
        }
    }
    emit(sub, &["Group", "Category", "Total", "Transactions"], rows)
}

fn monthly(ledger: &dyn Ledger, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let months = monthly_summary(ledger, &monthly_args(sub), today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
        return Ok(());
    }
    let rows = months
        .iter()
        .map(|m| {
            vec![
                format!("{:04}-{:02}", m.year, m.month),
                fmt_money(m.income),
                fmt_money(m.expenses),
                fmt_money(m.investments),
                fmt_money(m.net()),
                m.transactions.to_string(),
            ]
        })
        .collect();
    emit(
        sub,
        &["Month", "Income", "Expenses", "Investments", "Net", "Transactions"],
        rows,
    )
}

fn balances(ledger: &dyn Ledger, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let history = balance_history(ledger, &balance_args(sub), today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &history)? {
        return Ok(());
    }
    let rows = history
        .iter()
        .map(|b| {
            vec![
                format!("{:04}-{:02}", b.year, b.month),
                fmt_money(b.balance),
                b.transactions.to_string(),
            ]
        })
        .collect();
    emit(sub, &["Month", "Balance", "Transactions"], rows)
}
