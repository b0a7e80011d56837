// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CategoryGroup;
use serde::Serialize;
use std::collections::HashMap;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// How a category's transactions are treated, fixed when the index is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Investment,
    Uncategorized,
}

impl CategoryKind {
    /// The savings/investment flag wins over the income flag.
    pub fn for_group(group: &CategoryGroup) -> Self {
        if group.is_savings_or_investment {
            CategoryKind::Investment
        } else if group.is_income {
            CategoryKind::Income
        } else {
            CategoryKind::Expense
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    pub group_name: String,
    pub is_income: bool,
    pub is_savings_or_investment: bool,
    pub kind: CategoryKind,
    /// Position of the category in the ledger's own ordering.
    pub ordinal: usize,
    pub group_ordinal: usize,
}

impl CategoryEntry {
    fn uncategorized() -> Self {
        CategoryEntry {
            name: UNCATEGORIZED.to_string(),
            group_name: UNCATEGORIZED.to_string(),
            is_income: false,
            is_savings_or_investment: false,
            kind: CategoryKind::Uncategorized,
            ordinal: usize::MAX,
            group_ordinal: usize::MAX,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.kind == CategoryKind::Uncategorized
    }
}

/// Flat lookup from category id to its display names and group flags.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    entries: HashMap<String, CategoryEntry>,
    uncategorized: CategoryEntry,
}

impl CategoryIndex {
    pub fn build(groups: &[CategoryGroup]) -> Self {
        let mut entries = HashMap::new();
        let mut ordinal = 0;
        for (group_ordinal, group) in groups.iter().enumerate() {
            let kind = CategoryKind::for_group(group);
            for cat in &group.categories {
                entries.insert(
                    cat.id.clone(),
                    CategoryEntry {
                        name: cat.name.clone(),
                        group_name: group.name.clone(),
                        is_income: group.is_income,
                        is_savings_or_investment: group.is_savings_or_investment,
                        kind,
                        ordinal,
                        group_ordinal,
                    },
                );
                ordinal += 1;
            }
        }
        tracing::debug!(categories = entries.len(), groups = groups.len(), "built category index");
        CategoryIndex {
            entries,
            uncategorized: CategoryEntry::uncategorized(),
        }
    }

    pub fn get(&self, category_id: &str) -> Option<&CategoryEntry> {
        self.entries.get(category_id)
    }

    /// Missing or unknown ids resolve to the "Uncategorized" entry.
    pub fn resolve(&self, category_id: Option<&str>) -> &CategoryEntry {
        category_id
            .and_then(|id| self.entries.get(id))
            .unwrap_or(&self.uncategorized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
