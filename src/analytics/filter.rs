// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::category_index::CategoryEntry;
use crate::error::{AnalyticsError, Result};
use crate::models::Transaction;
use chrono::NaiveDate;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        AnalyticsError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Parses optional start/end bounds and rejects a start after the end.
pub fn date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(AnalyticsError::Validation(format!(
                "startDate {} is after endDate {}",
                s, e
            )));
        }
    }
    Ok((start, end))
}

/// Per-transaction predicates shared by the spending report and the
/// transaction listing. Amount bounds apply to the absolute minor-unit amount;
/// name filters are case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category_name: Option<String>,
    pub payee_name: Option<String>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
}

impl TransactionFilter {
    pub fn has_date_bounds(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Transactions without a date never pass a date-bounded filter.
    pub fn matches(&self, t: &Transaction, entry: &CategoryEntry) -> bool {
        if self.has_date_bounds() {
            let Some(d) = t.date else {
                return false;
            };
            if self.start.is_some_and(|s| d < s) || self.end.is_some_and(|e| d > e) {
                return false;
            }
        }
        if let Some(name) = &self.category_name {
            if !contains_ci(&entry.name, name) {
                return false;
            }
        }
        if let Some(name) = &self.payee_name {
            match &t.payee_name {
                Some(p) if contains_ci(p, name) => {}
                _ => return false,
            }
        }
        let abs = t.amount.unsigned_abs();
        if self.min_amount.is_some_and(|m| abs < m.unsigned_abs()) {
            return false;
        }
        if self.max_amount.is_some_and(|m| abs > m.unsigned_abs()) {
            return false;
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.trim().to_lowercase().as_str())
}
