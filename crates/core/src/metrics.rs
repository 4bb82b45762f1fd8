// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-class process metrics.
//!
//! Fills the numeric row fields the dataset writer consumes: revision
//! count, defect-fix count, author count, and added/removed/churn line
//! aggregates. All of them derive from the commits of the class's own
//! release, so they are stable across walk-forward cuts at or after
//! that release. Complexity metrics from external tooling are out of
//! scope here.

use std::collections::{HashMap, HashSet};

use crate::class::{LocStats, ProjectClass};
use crate::commit::Commit;
use crate::error::Result;
use crate::source::Vcs;

/// Computes metrics for every class in place.
///
/// First attaches to each class the same-release commits that touched
/// its path, then aggregates over them. Parentless commits have no
/// diff and touch nothing.
pub fn compute(classes: &mut [ProjectClass], commits: &[Commit], vcs: &dyn Vcs) -> Result<()> {
    let mut by_key: HashMap<(u32, String), usize> = HashMap::new();
    for (i, class) in classes.iter().enumerate() {
        by_key.insert((class.release, class.name.clone()), i);
    }

    for commit in commits {
        if !commit.has_parent() {
            continue;
        }
        for path in vcs.touched_paths(&commit.hash)? {
            if let Some(&i) = by_key.get(&(commit.release, path)) {
                if !classes[i].touching.iter().any(|h| h == &commit.hash) {
                    classes[i].touching.push(commit.hash.clone());
                }
            }
        }
    }

    let by_hash: HashMap<&str, &Commit> =
        commits.iter().map(|c| (c.hash.as_str(), c)).collect();

    for class in classes.iter_mut() {
        let mut authors: HashSet<&str> = HashSet::new();
        let mut fixes: HashSet<&str> = HashSet::new();
        let mut added: Vec<u32> = Vec::new();
        let mut removed: Vec<u32> = Vec::new();

        for hash in &class.touching {
            let Some(commit) = by_hash.get(hash.as_str()) else {
                continue;
            };
            authors.insert(commit.author.as_str());
            if let Some(key) = commit.ticket.as_deref() {
                fixes.insert(key);
            }
            let (add, del) = vcs.line_deltas(hash, &class.name)?;
            added.push(add);
            removed.push(del);
        }

        let churn: Vec<u32> = added
            .iter()
            .zip(&removed)
            .map(|(a, r)| a.abs_diff(*r))
            .collect();

        let revisions = class.touching.len() as u32;
        class.metrics.revisions = revisions;
        class.metrics.authors = authors.len() as u32;
        class.metrics.fixes = fixes.len() as u32;
        class.metrics.added = stats(&added, revisions);
        class.metrics.removed = stats(&removed, revisions);
        class.metrics.churn = stats(&churn, revisions);
    }

    Ok(())
}

fn stats(values: &[u32], revisions: u32) -> LocStats {
    let total: u32 = values.iter().sum();
    let max = values.iter().copied().max().unwrap_or(0);
    let avg = if revisions == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(revisions)
    };
    LocStats { total, max, avg }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
