// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only tools an agent can call by name with JSON arguments.

use crate::analytics::{
    balance_history, list_transactions, monthly_summary, spending_by_category,
    BalanceHistoryArgs, GetTransactionsArgs, MonthlySummaryArgs, SpendingArgs,
};
use crate::error::{AnalyticsError, Result};
use crate::ledger::Ledger;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub trait Tool {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn execute(&self, ledger: &dyn Ledger, args: Value, today: NaiveDate) -> Result<Value>;
}

/// Tools in registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn with_read_tools() -> Self {
        let mut r = Self::new();
        r.register(Box::new(GetTransactions));
        r.register(Box::new(SpendingByCategory));
        r.register(Box::new(MonthlySummary));
        r.register(Box::new(BalanceHistory));
        r.register(Box::new(GetAccounts));
        r.register(Box::new(GetGroupedCategories));
        r.register(Box::new(GetPayees));
        r.register(Box::new(GetRules));
        r
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    pub fn invoke(
        &self,
        ledger: &dyn Ledger,
        name: &str,
        args: Value,
        today: NaiveDate,
    ) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| AnalyticsError::UnknownTool(name.to_string()))?;
        tracing::info!(tool = name, "executing tool");
        tool.execute(ledger, args, today).inspect_err(|e| {
            tracing::warn!(tool = name, error = %e, "tool failed");
        })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_read_tools()
    }
}

/// Dispatches `name` against the read-only tool set, anchored at today's date.
pub fn invoke(ledger: &dyn Ledger, name: &str, args: Value) -> Result<Value> {
    let today = chrono::Local::now().date_naive();
    ToolRegistry::with_read_tools().invoke(ledger, name, args, today)
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    if !args.is_object() {
        return Err(AnalyticsError::Validation(
            "tool arguments must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(args)?)
}

struct GetTransactions;

impl Tool for GetTransactions {
    fn name(&self) -> &'static str {
        "get-transactions"
    }

    fn description(&self) -> &'static str {
        "Get transactions for an account with optional date, amount, category and payee filters"
    }

    fn execute(&self, ledger: &dyn Ledger, args: Value, _today: NaiveDate) -> Result<Value> {
        let args: GetTransactionsArgs = parse_args(args)?;
        Ok(serde_json::to_value(list_transactions(ledger, &args)?)?)
    }
}

struct SpendingByCategory;

impl Tool for SpendingByCategory {
    fn name(&self) -> &'static str {
        "spending-by-category"
    }

    fn description(&self) -> &'static str {
        "Get spending grouped by category and category group for a date range"
    }

    fn execute(&self, ledger: &dyn Ledger, args: Value, _today: NaiveDate) -> Result<Value> {
        let args: SpendingArgs = parse_args(args)?;
        Ok(serde_json::to_value(spending_by_category(ledger, &args)?)?)
    }
}

struct MonthlySummary;

impl Tool for MonthlySummary {
    fn name(&self) -> &'static str {
        "monthly-summary"
    }

    fn description(&self) -> &'static str {
        "Get income, expenses and investments for each of the last N months"
    }

    fn execute(&self, ledger: &dyn Ledger, args: Value, today: NaiveDate) -> Result<Value> {
        let args: MonthlySummaryArgs = parse_args(args)?;
        Ok(serde_json::to_value(monthly_summary(ledger, &args, today)?)?)
    }
}

struct BalanceHistory;

impl Tool for BalanceHistory {
    fn name(&self) -> &'static str {
        "balance-history"
    }

    fn description(&self) -> &'static str {
        "Get an account's month-end balance for each of the last N months"
    }

    fn execute(&self, ledger: &dyn Ledger, args: Value, today: NaiveDate) -> Result<Value> {
        let args: BalanceHistoryArgs = parse_args(args)?;
        Ok(serde_json::to_value(balance_history(ledger, &args, today)?)?)
    }
}

struct GetAccounts;

impl Tool for GetAccounts {
    fn name(&self) -> &'static str {
        "get-accounts"
    }

    fn description(&self) -> &'static str {
        "List all accounts with their current balance"
    }

    fn execute(&self, ledger: &dyn Ledger, _args: Value, _today: NaiveDate) -> Result<Value> {
        Ok(serde_json::to_value(ledger.fetch_all_accounts()?)?)
    }
}

struct GetGroupedCategories;

impl Tool for GetGroupedCategories {
    fn name(&self) -> &'static str {
        "get-grouped-categories"
    }

    fn description(&self) -> &'static str {
        "List category groups with their categories"
    }

    fn execute(&self, ledger: &dyn Ledger, _args: Value, _today: NaiveDate) -> Result<Value> {
        Ok(serde_json::to_value(ledger.fetch_grouped_categories()?)?)
    }
}

struct GetPayees;

impl Tool for GetPayees {
    fn name(&self) -> &'static str {
        "get-payees"
    }

    fn description(&self) -> &'static str {
        "List all payees"
    }

    fn execute(&self, ledger: &dyn Ledger, _args: Value, _today: NaiveDate) -> Result<Value> {
        Ok(serde_json::to_value(ledger.fetch_payees()?)?)
    }
}

struct GetRules;

impl Tool for GetRules {
    fn name(&self) -> &'static str {
        "get-rules"
    }

    fn description(&self) -> &'static str {
        "List all categorisation rules with their conditions and actions"
    }

    fn execute(&self, ledger: &dyn Ledger, _args: Value, _today: NaiveDate) -> Result<Value> {
        Ok(serde_json::to_value(ledger.fetch_rules()?)?)
    }
}
