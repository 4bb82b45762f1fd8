// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fl-core operations.
//!
//! Only structurally fatal conditions surface as [`Error`]: an empty
//! release timeline, a ticket corpus that filtered down to nothing, or a
//! collaborator failure. Per-ticket and per-commit problems (unresolvable
//! version names, inconsistent orderings, missing parent commits) are
//! absorbed where they occur by dropping the offending record.

use thiserror::Error;

/// All possible errors that can occur in fl-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("release list is empty: nothing can be mined without a timeline")]
    EmptyReleaseList,

    #[error("no usable tickets remain after filtering and correlation")]
    EmptyTicketCorpus,

    #[error("release ordinal {0} is not on the timeline")]
    OrdinalOutOfRange(u32),

    #[error("invalid calendar date: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("invalid proportion strategy: '{0}'\n  hint: valid strategies are: incremental, batch")]
    InvalidProportionKind(String),

    #[error("version control error: {0}")]
    Vcs(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// A specialized Result type for fl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
