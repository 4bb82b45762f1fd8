// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Commit-to-release and commit-to-ticket correlation.
//!
//! Release assignment is a single forward scan over commits and
//! releases both sorted by date, with the release boundary only ever
//! advancing: a commit can never land on a release earlier than one
//! already consumed by an earlier commit. Ticket matching looks for
//! the ticket key as a whole word in the commit message, never as a
//! substring, so "PROJ-11" does not match "PROJ-110".

use regex::Regex;

use crate::commit::Commit;
use crate::release::ReleaseTimeline;
use crate::ticket::Ticket;

/// Counts, per release in timeline date order, the commits that would
/// be dated into it. Used to prune commitless releases before ordinal
/// assignment. `commits` must be sorted by date.
pub fn commit_counts(commits: &[Commit], timeline: &ReleaseTimeline) -> Vec<usize> {
    let dates: Vec<_> = timeline.iter().map(|r| r.date).collect();
    let mut counts = vec![0usize; dates.len()];
    let mut idx = 0;
    for commit in commits {
        while idx < dates.len() && dates[idx] < commit.date {
            idx += 1;
        }
        if idx < dates.len() {
            counts[idx] += 1;
        }
    }
    counts
}

/// Assigns each commit to the earliest release whose date is on or
/// after the commit date, in one forward scan. `commits` must be
/// sorted by date; the timeline must have ordinals assigned.
///
/// Commits dated past the last release cannot be owned by anything and
/// are dropped; gap filling exists so this only happens when it is
/// disabled. Returns the number dropped.
pub fn assign_releases(commits: &mut Vec<Commit>, timeline: &ReleaseTimeline) -> usize {
    let releases: Vec<_> = timeline.iter().map(|r| (r.date, r.ordinal())).collect();
    let mut idx = 0;
    for commit in commits.iter_mut() {
        while idx < releases.len() && releases[idx].0 < commit.date {
            idx += 1;
        }
        if let Some(&(_, ordinal)) = releases.get(idx) {
            commit.release = ordinal;
        }
    }

    let before = commits.len();
    commits.retain(|c| c.release != 0);
    let dropped = before - commits.len();
    if dropped > 0 {
        tracing::warn!(dropped, "commits dated past the last release dropped");
    }
    dropped
}

/// Links commits to tickets by whole-word key match in the commit
/// message.
///
/// A commit may match several tickets (each records it), but keeps a
/// back-reference only to the first match. Tickets that end up with no
/// commit evidence are dropped: an unreferenced ticket is not "fixed"
/// as far as this corpus is concerned. Returns the number of commits
/// that matched at least one ticket.
pub fn correlate(commits: &mut [Commit], tickets: &mut Vec<Ticket>) -> usize {
    let patterns: Vec<Option<Regex>> = tickets
        .iter()
        .map(|t| {
            let pattern = format!(r"\b{}\b", regex::escape(&t.key));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(_) => {
                    tracing::warn!(key = %t.key, "unusable ticket key pattern");
                    None
                }
            }
        })
        .collect();

    let mut matched = 0;
    for commit in commits.iter_mut() {
        let mut hit = false;
        for (ticket, pattern) in tickets.iter_mut().zip(&patterns) {
            let Some(pattern) = pattern else { continue };
            if pattern.is_match(&commit.message) {
                ticket.add_commit(&commit.hash);
                if commit.ticket.is_none() {
                    commit.ticket = Some(ticket.key.clone());
                }
                hit = true;
            }
        }
        if hit {
            matched += 1;
        }
    }

    let before = tickets.len();
    tickets.retain(|t| !t.commits.is_empty());
    if tickets.len() < before {
        tracing::debug!(
            dropped = before - tickets.len(),
            "tickets without commit evidence dropped"
        );
    }
    matched
}

#[cfg(test)]
#[path = "correlate_tests.rs"]
mod tests;
