// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Walk-forward snapshot construction.
//!
//! The timeline is replayed cut by cut. At cut `i` the training
//! snapshot may only contain information dated at or before release
//! `i`: tickets are re-clipped to what the tracker knew then, the
//! injected versions re-estimated from that clipped view, and the
//! classes re-labeled, so nothing from release `i+1` or later can leak
//! in. The testing snapshot is release `i+1` exactly, labeled with the
//! full history, since the ground-truth label for evaluation is
//! allowed to see the future.
//!
//! Cuts range over `2..=ceil(N / 2)`: the first release never trains
//! alone, and the last half of the timeline is reserved so a testing
//! release always exists.

use serde::{Deserialize, Serialize};

use crate::class::{ClassMetrics, ProjectClass};
use crate::commit::Commit;
use crate::error::{Error, Result};
use crate::label;
use crate::proportion::ProportionStrategy;
use crate::release::ReleaseTimeline;
use crate::source::Vcs;
use crate::ticket::Ticket;

/// One emitted dataset row: a labeled class at a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRow {
    pub name: String,
    pub release: u32,
    #[serde(flatten)]
    pub metrics: ClassMetrics,
    pub buggy: bool,
}

/// An immutable view of the corpus consistent with one as-of ordinal.
///
/// Snapshots own their data outright; mutating one can never affect
/// another.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The as-of release ordinal.
    pub cut: u32,
    pub releases: ReleaseTimeline,
    pub tickets: Vec<Ticket>,
    pub commits: Vec<Commit>,
    pub classes: Vec<ProjectClass>,
}

impl Snapshot {
    /// Dataset rows for this snapshot. Classes owned by synthetic
    /// gap-filling releases are held back from user-facing output.
    pub fn rows(&self) -> Vec<ClassRow> {
        let synthetic: Vec<u32> = self
            .releases
            .iter()
            .filter(|r| r.synthetic)
            .map(|r| r.ordinal())
            .collect();
        self.classes
            .iter()
            .filter(|c| !synthetic.contains(&c.release))
            .map(|c| ClassRow {
                name: c.name.clone(),
                release: c.release,
                metrics: c.metrics.clone(),
                buggy: c.buggy,
            })
            .collect()
    }
}

/// One walk-forward iteration: train at the cut, test on the release
/// right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    pub cut: u32,
    pub training: Snapshot,
    pub testing: Snapshot,
}

impl Iteration {
    pub fn training_rows(&self) -> Vec<ClassRow> {
        self.training.rows()
    }

    pub fn testing_rows(&self) -> Vec<ClassRow> {
        self.testing.rows()
    }
}

/// Replays the timeline and emits one iteration per cut.
///
/// `tickets` is the accepted, correlated corpus in pre-estimation
/// state (estimation is re-run inside every cut); `estimated` is the
/// same corpus after a full-history estimation pass, used only to
/// label testing snapshots.
#[allow(clippy::too_many_arguments)]
pub fn run(
    timeline: &ReleaseTimeline,
    tickets: &[Ticket],
    estimated: &[Ticket],
    commits: &[Commit],
    classes: &[ProjectClass],
    vcs: &dyn Vcs,
    strategy: &dyn ProportionStrategy,
) -> Result<Vec<Iteration>> {
    if timeline.is_empty() {
        return Err(Error::EmptyReleaseList);
    }
    if tickets.is_empty() {
        return Err(Error::EmptyTicketCorpus);
    }

    let releases = timeline.len() as u32;
    let last_cut = releases.div_ceil(2);
    let mut iterations = Vec::new();

    for cut in 2..=last_cut {
        if timeline.by_ordinal(cut + 1).is_none() {
            break;
        }

        let training = training_snapshot(cut, timeline, tickets, commits, classes, vcs, strategy)?;
        let testing = testing_snapshot(cut, timeline, estimated, commits, classes, vcs)?;

        tracing::info!(
            cut,
            training_classes = training.classes.len(),
            testing_classes = testing.classes.len(),
            "walk-forward iteration built"
        );
        iterations.push(Iteration { cut, training, testing });
    }

    Ok(iterations)
}

/// Everything dated at or before the cut, re-estimated and re-labeled
/// inside that boundary.
fn training_snapshot(
    cut: u32,
    timeline: &ReleaseTimeline,
    tickets: &[Ticket],
    commits: &[Commit],
    classes: &[ProjectClass],
    vcs: &dyn Vcs,
    strategy: &dyn ProportionStrategy,
) -> Result<Snapshot> {
    let releases = timeline.subset_through(cut);

    let mut cut_tickets: Vec<Ticket> =
        tickets.iter().filter_map(|t| t.clone_at(cut)).collect();
    strategy.estimate(&mut cut_tickets, &releases)?;

    let cut_commits: Vec<Commit> = commits
        .iter()
        .filter(|c| c.release != 0 && c.release <= cut)
        .cloned()
        .collect();
    let mut cut_classes: Vec<ProjectClass> = classes
        .iter()
        .filter(|c| c.release <= cut)
        .cloned()
        .collect();

    label::label(&mut cut_classes, &cut_tickets, &cut_commits, &releases, vcs)?;

    Ok(Snapshot {
        cut,
        releases,
        tickets: cut_tickets,
        commits: cut_commits,
        classes: cut_classes,
    })
}

/// The classes of release `cut + 1` exactly, labeled with the full
/// history: only training features must be leak-free, not the ground
/// truth used to score them.
fn testing_snapshot(
    cut: u32,
    timeline: &ReleaseTimeline,
    estimated: &[Ticket],
    commits: &[Commit],
    classes: &[ProjectClass],
    vcs: &dyn Vcs,
) -> Result<Snapshot> {
    let target = cut + 1;
    let mut test_classes: Vec<ProjectClass> = classes
        .iter()
        .filter(|c| c.release == target)
        .cloned()
        .collect();

    let tickets: Vec<Ticket> = estimated.to_vec();
    let commits: Vec<Commit> = commits.to_vec();
    label::label(&mut test_classes, &tickets, &commits, timeline, vcs)?;

    Ok(Snapshot {
        cut: target,
        releases: timeline.subset_through(target),
        tickets,
        commits,
        classes: test_classes,
    })
}

#[cfg(test)]
#[path = "walkforward_tests.rs"]
mod tests;
