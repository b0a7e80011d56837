// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors surfaced by the analytics core and the ledger adapters.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// An id that should resolve through the ledger did not.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Caller supplied arguments that cannot be aggregated.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The ledger collaborator failed. Never retried here.
    #[error("Ledger error: {0}")]
    Upstream(String),

    #[error("Unknown tool {0}")]
    UnknownTool(String),
}

impl AnalyticsError {
    pub fn account_not_found(id: &str) -> Self {
        AnalyticsError::NotFound {
            kind: "Account",
            id: id.to_string(),
        }
    }
}

impl From<rusqlite::Error> for AnalyticsError {
    fn from(e: rusqlite::Error) -> Self {
        AnalyticsError::Upstream(e.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        AnalyticsError::Validation(e.to_string())
    }
}

impl From<std::io::Error> for AnalyticsError {
    fn from(e: std::io::Error) -> Self {
        AnalyticsError::Upstream(e.to_string())
    }
}
