// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! (year, month) buckets for time-series aggregation.

use crate::error::{AnalyticsError, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(MonthBucket { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthBucket {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            MonthBucket {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthBucket {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthBucket {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthBucket {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        MonthBucket::of(date) == self
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn bucket_of(date: NaiveDate) -> MonthBucket {
    MonthBucket::of(date)
}

/// Longest window a report accepts (one hundred years).
pub const MAX_MONTHS: usize = 1200;

/// The `n` months ending at `anchor`'s month, oldest first.
pub fn month_window(n: usize, anchor: NaiveDate) -> Vec<MonthBucket> {
    let mut out = Vec::with_capacity(n.min(MAX_MONTHS));
    let mut b = bucket_of(anchor);
    for _ in 0..n {
        out.push(b);
        b = b.prev();
    }
    out.reverse();
    out
}

/// [`month_window`] for a caller-supplied month count, rejecting counts above
/// [`MAX_MONTHS`].
pub fn report_window(months: usize, anchor: NaiveDate) -> Result<Vec<MonthBucket>> {
    if months > MAX_MONTHS {
        return Err(AnalyticsError::Validation(format!(
            "months must be at most {}, got {}",
            MAX_MONTHS, months
        )));
    }
    Ok(month_window(months, anchor))
}
