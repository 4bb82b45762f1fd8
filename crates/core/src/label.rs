// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Buggy class-at-release labeling.
//!
//! A class at release R is defective when some ticket's bug window
//! `[IV, FV]` covers R and one of the ticket's commits, dated inside
//! the ticket's creation/resolution window, touched the class's path.
//! Labeling is always a full recompute: the set of known tickets
//! changes between walk-forward cuts, so incremental patching would
//! carry stale labels across snapshots.

use std::collections::HashMap;

use crate::class::ProjectClass;
use crate::commit::Commit;
use crate::error::Result;
use crate::release::ReleaseTimeline;
use crate::source::Vcs;
use crate::ticket::Ticket;

/// Recomputes the buggy flag of every class from scratch.
///
/// Tickets without a resolved IV contribute nothing; commits without a
/// parent have no diff and are skipped.
pub fn label(
    classes: &mut [ProjectClass],
    tickets: &[Ticket],
    commits: &[Commit],
    timeline: &ReleaseTimeline,
    vcs: &dyn Vcs,
) -> Result<()> {
    for class in classes.iter_mut() {
        class.buggy = false;
    }

    let mut by_path: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, class) in classes.iter().enumerate() {
        by_path.entry(class.name.clone()).or_default().push(i);
    }
    let by_hash: HashMap<&str, &Commit> =
        commits.iter().map(|c| (c.hash.as_str(), c)).collect();

    let mut labeled = 0usize;
    for ticket in tickets {
        let Some(iv) = ticket.iv else { continue };
        let iv_date = timeline.date_of(iv)?;
        let fv_date = timeline.date_of(ticket.fv)?;

        for hash in &ticket.commits {
            let Some(commit) = by_hash.get(hash.as_str()) else {
                continue;
            };
            if commit.date < ticket.created || commit.date > ticket.resolved {
                continue;
            }
            if !commit.has_parent() {
                continue;
            }
            for path in vcs.touched_paths(&commit.hash)? {
                let Some(indices) = by_path.get(&path) else {
                    continue;
                };
                for &i in indices {
                    let Ok(release_date) = timeline.date_of(classes[i].release) else {
                        continue;
                    };
                    if iv_date <= release_date && release_date <= fv_date && !classes[i].buggy {
                        classes[i].buggy = true;
                        labeled += 1;
                    }
                }
            }
        }
    }

    tracing::debug!(labeled, total = classes.len(), "labeling pass complete");
    Ok(())
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
