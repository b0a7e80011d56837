// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ledger, TransactionQuery};
use crate::error::{AnalyticsError, Result};
use crate::models::{Account, Category, CategoryGroup, Payee, Rule, Transaction};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

/// Read-only view over a moneylens SQLite database.
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| AnalyticsError::Upstream(format!("Open DB at {}: {}", path.display(), e)))?;
        Ok(SqliteLedger { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        SqliteLedger { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Ledger for SqliteLedger {
    fn fetch_all_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.offbudget, a.closed, IFNULL(SUM(t.amount),0) AS bal
             FROM accounts a
             LEFT JOIN transactions t ON t.account_id=a.id
             GROUP BY a.id ORDER BY a.sort_order, a.rowid",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(Account {
                id: r.get(0)?,
                name: r.get(1)?,
                off_budget: r.get(2)?,
                closed: r.get(3)?,
                balance: r.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        tracing::debug!(count = out.len(), "fetched accounts");
        Ok(out)
    }

    fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.account_id, t.date, t.amount, t.category_id, t.payee_id, p.name,
                    t.notes, t.cleared, t.transfer_account_id
             FROM transactions t
             LEFT JOIN payees p ON t.payee_id=p.id
             WHERE t.account_id=?1
             ORDER BY t.date, t.rowid",
        )?;
        let mut cur = stmt.query(params![query.account_id])?;
        let mut out = Vec::new();
        while let Some(r) = cur.next()? {
            let id: String = r.get(0)?;
            let raw_date: Option<String> = r.get(2)?;
            let date = raw_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
            if date.is_none() {
                tracing::debug!(transaction = %id, raw = ?raw_date, "unreadable transaction date");
            }
            if !query.admits(date) {
                continue;
            }
            out.push(Transaction {
                id,
                account_id: r.get(1)?,
                date,
                amount: r.get(3)?,
                category_id: r.get(4)?,
                payee_id: r.get(5)?,
                payee_name: r.get(6)?,
                notes: r.get(7)?,
                cleared: r.get(8)?,
                transfer_account_id: r.get(9)?,
            });
        }
        tracing::debug!(
            account = %query.account_id,
            count = out.len(),
            "fetched transactions"
        );
        Ok(out)
    }

    fn fetch_grouped_categories(&self) -> Result<Vec<CategoryGroup>> {
        let mut gstmt = self.conn.prepare(
            "SELECT id, name, is_income, is_savings_or_investment
             FROM category_groups ORDER BY sort_order, rowid",
        )?;
        let groups = gstmt.query_map([], |r| {
            Ok(CategoryGroup {
                id: r.get(0)?,
                name: r.get(1)?,
                is_income: r.get(2)?,
                is_savings_or_investment: r.get(3)?,
                categories: Vec::new(),
            })
        })?;
        let mut out = Vec::new();
        for g in groups {
            out.push(g?);
        }

        let mut cstmt = self
            .conn
            .prepare("SELECT id, name, group_id FROM categories ORDER BY sort_order, rowid")?;
        let cats = cstmt.query_map([], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                group_id: r.get(2)?,
            })
        })?;
        for c in cats {
            let c = c?;
            match out.iter_mut().find(|g| g.id == c.group_id) {
                Some(group) => group.categories.push(c),
                None => tracing::debug!(category = %c.id, group = %c.group_id, "category without group"),
            }
        }
        Ok(out)
    }

    fn fetch_payees(&self) -> Result<Vec<Payee>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM payees ORDER BY name")?;
        let rows = stmt.query_map([], |r| {
            Ok(Payee {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn fetch_rules(&self) -> Result<Vec<Rule>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, stage, conditions_op, conditions, actions FROM rules ORDER BY rowid",
        )?;
        let mut cur = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = cur.next()? {
            let id: String = r.get(0)?;
            let conditions: String = r.get(3)?;
            let actions: String = r.get(4)?;
            let bad_json = |what: &str, e: serde_json::Error| {
                AnalyticsError::Upstream(format!("Rule {} has unreadable {}: {}", id, what, e))
            };
            out.push(Rule {
                stage: r.get(1)?,
                conditions_op: r.get(2)?,
                conditions: serde_json::from_str(&conditions)
                    .map_err(|e| bad_json("conditions", e))?,
                actions: serde_json::from_str(&actions).map_err(|e| bad_json("actions", e))?,
                id,
            });
        }
        tracing::debug!(count = out.len(), "fetched rules");
        Ok(out)
    }
}
