// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::commit::Commit;
use crate::error::Result;
use crate::release::{Release, ReleaseTimeline};
use crate::source::Vcs;
use crate::ticket::Ticket;

pub(crate) fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Timeline with releases named r1..rN at the given dates, ordinals
/// assigned.
pub(crate) fn timeline(dates: &[&str]) -> ReleaseTimeline {
    let mut timeline = ReleaseTimeline::new();
    for (i, d) in dates.iter().enumerate() {
        let name = format!("r{}", i + 1);
        timeline.push(Release::new(&name, &name, d).unwrap());
    }
    timeline.assign_ordinals();
    timeline
}

pub(crate) fn ticket(
    key: &str,
    created: &str,
    resolved: &str,
    ov: u32,
    fv: u32,
    affected: &[u32],
) -> Ticket {
    Ticket {
        key: key.to_string(),
        created: date(created),
        resolved: date(resolved),
        ov,
        fv,
        iv: affected.first().copied(),
        affected: affected.to_vec(),
        commits: Vec::new(),
    }
}

pub(crate) fn commit(hash: &str, day: &str, message: &str, release: u32, parent: bool) -> Commit {
    Commit {
        hash: hash.to_string(),
        author: format!("author-of-{hash}"),
        message: message.to_string(),
        date: date(day),
        parents: if parent { vec![format!("parent-of-{hash}")] } else { Vec::new() },
        release,
        ticket: None,
    }
}

/// In-memory stand-in for the version-control collaborator.
#[derive(Default)]
pub(crate) struct FakeVcs {
    touched: HashMap<String, Vec<String>>,
    deltas: HashMap<(String, String), (u32, u32)>,
    trees: HashMap<String, Vec<(String, u32)>>,
}

impl FakeVcs {
    pub(crate) fn new() -> Self {
        FakeVcs::default()
    }

    pub(crate) fn touch(&mut self, hash: &str, paths: &[&str]) -> &mut Self {
        self.touched
            .insert(hash.to_string(), paths.iter().map(|p| p.to_string()).collect());
        self
    }

    pub(crate) fn delta(&mut self, hash: &str, path: &str, added: u32, removed: u32) -> &mut Self {
        self.deltas
            .insert((hash.to_string(), path.to_string()), (added, removed));
        self
    }

    pub(crate) fn tree(&mut self, hash: &str, entries: &[(&str, u32)]) -> &mut Self {
        self.trees.insert(
            hash.to_string(),
            entries.iter().map(|(p, n)| (p.to_string(), *n)).collect(),
        );
        self
    }
}

impl Vcs for FakeVcs {
    fn touched_paths(&self, hash: &str) -> Result<Vec<String>> {
        Ok(self.touched.get(hash).cloned().unwrap_or_default())
    }

    fn line_deltas(&self, hash: &str, path: &str) -> Result<(u32, u32)> {
        Ok(self
            .deltas
            .get(&(hash.to_string(), path.to_string()))
            .copied()
            .unwrap_or((0, 0)))
    }

    fn tree_paths(&self, hash: &str) -> Result<Vec<(String, u32)>> {
        Ok(self.trees.get(hash).cloned().unwrap_or_default())
    }
}
