// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw input records and the version-control collaborator boundary.
//!
//! The core never talks to a tracker or a repository itself. The
//! orchestration layer hands it plain records ([`RawRelease`],
//! [`RawTicket`], [`RawCommit`]) and an implementation of [`Vcs`] for
//! the diff and tree questions that can only be answered by the
//! repository. Tests inject an in-memory fake.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A release row as reported by the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelease {
    pub id: String,
    pub name: String,
    /// Calendar date, `%Y-%m-%d`, no time component.
    pub date: String,
}

/// A bug ticket row as reported by the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTicket {
    /// Tracker key, e.g. "STORM-1105".
    pub key: String,
    pub created: String,
    pub resolved: String,
    pub opening_version: String,
    pub fixed_version: String,
    #[serde(default)]
    pub affected_versions: Vec<String>,
}

/// A commit row as reported by the version-control system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    pub hash: String,
    pub author: String,
    pub message: String,
    /// Committer date, `%Y-%m-%d`.
    pub date: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// Version-control collaborator interface.
///
/// Implementations live outside the core (a git binding, a fixture).
/// All methods take commit hashes; a commit without a parent has no
/// diff, and callers skip it rather than asking.
pub trait Vcs {
    /// Paths changed by a commit relative to its first parent.
    fn touched_paths(&self, hash: &str) -> Result<Vec<String>>;

    /// (added, removed) line counts for one path in one commit.
    fn line_deltas(&self, hash: &str, path: &str) -> Result<(u32, u32)>;

    /// (path, line count) for every source file visible at a commit.
    fn tree_paths(&self, hash: &str) -> Result<Vec<(String, u32)>>;
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
