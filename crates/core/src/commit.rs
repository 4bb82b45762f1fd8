// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Commit entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::source::RawCommit;

/// One version-control commit, dated into exactly one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub message: String,
    /// Committer date.
    pub date: NaiveDate,
    pub parents: Vec<String>,
    /// Ordinal of the owning release; 0 until assigned.
    pub release: u32,
    /// Key of the ticket this commit was matched to, if any. A commit
    /// belongs to at most one ticket even when its message references
    /// several.
    pub ticket: Option<String>,
}

impl Commit {
    /// Parses a raw commit record; returns None when the date is not a
    /// calendar date (the record is dropped, not fatal).
    pub fn parse(raw: &RawCommit) -> Option<Self> {
        let date: NaiveDate = match raw.date.parse() {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!(hash = %raw.hash, date = %raw.date, "unparseable commit date, dropped");
                return None;
            }
        };
        Some(Commit {
            hash: raw.hash.clone(),
            author: raw.author.clone(),
            message: raw.message.clone(),
            date,
            parents: raw.parents.clone(),
            release: 0,
            ticket: None,
        })
    }

    /// Initial commits have no parent and contribute no diff.
    pub fn has_parent(&self) -> bool {
        !self.parents.is_empty()
    }
}

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;
