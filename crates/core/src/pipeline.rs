// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end mining pipeline.
//!
//! [`Miner`] is the library entry point: raw tracker and
//! version-control records in, walk-forward dataset iterations out.
//! Stages run strictly in sequence (timeline, gap filling, commit
//! assignment, ticket intake, correlation, class collection, metrics,
//! estimation, walk-forward) because each one consumes the fully
//! materialized output of the previous.

use crate::class::{self, ProjectClass};
use crate::commit::Commit;
use crate::config::MinerConfig;
use crate::consistency;
use crate::correlate;
use crate::error::{Error, Result};
use crate::metrics;
use crate::proportion::ProportionTrace;
use crate::release::{Release, ReleaseTimeline};
use crate::source::{RawCommit, RawRelease, RawTicket, Vcs};
use crate::ticket::Ticket;
use crate::walkforward::{self, Iteration};

/// Everything a mining run produces.
#[derive(Debug)]
pub struct MinedDataset {
    /// The finalized timeline, ordinals assigned.
    pub timeline: ReleaseTimeline,
    /// The accepted corpus after full-history IV estimation.
    pub tickets: Vec<Ticket>,
    /// All class-at-release entities with metrics attached.
    pub classes: Vec<ProjectClass>,
    /// One entry per walk-forward cut.
    pub iterations: Vec<Iteration>,
    /// Trace of the full-history estimation run.
    pub trace: ProportionTrace,
}

/// Builds defect-prediction datasets from raw mined records.
pub struct Miner<'a> {
    vcs: &'a dyn Vcs,
    config: MinerConfig,
}

impl<'a> Miner<'a> {
    pub fn new(vcs: &'a dyn Vcs, config: MinerConfig) -> Self {
        Miner { vcs, config }
    }

    /// Runs the full pipeline.
    ///
    /// Fatal only when nothing meaningful can be computed: an empty
    /// release list, or a corpus where every ticket was dropped. All
    /// other inconsistencies are absorbed by dropping the offending
    /// record.
    pub fn mine(
        &self,
        releases: &[RawRelease],
        tickets: &[RawTicket],
        commits: &[RawCommit],
    ) -> Result<MinedDataset> {
        if releases.is_empty() {
            return Err(Error::EmptyReleaseList);
        }

        let mut timeline = ReleaseTimeline::new();
        for raw in releases {
            timeline.push(Release::new(&raw.id, &raw.name, &raw.date)?);
        }
        tracing::info!(releases = timeline.len(), "timeline built");

        let mut commits: Vec<Commit> = commits.iter().filter_map(Commit::parse).collect();
        commits.sort_by(|a, b| a.date.cmp(&b.date));
        tracing::info!(commits = commits.len(), "commit history parsed");

        if self.config.fill_release_gaps {
            if let (Some(first), Some(last)) = (commits.first(), commits.last()) {
                timeline.fill_gaps(first.date, last.date);
            }
        }

        let counts = correlate::commit_counts(&commits, &timeline);
        timeline.retain_with_commits(&counts);
        if timeline.is_empty() {
            return Err(Error::EmptyReleaseList);
        }
        timeline.assign_ordinals();
        correlate::assign_releases(&mut commits, &timeline);

        let mut tickets: Vec<Ticket> = tickets
            .iter()
            .filter_map(|raw| Ticket::resolve(raw, &timeline))
            .filter(|t| consistency::accept(t, &timeline))
            .collect();
        tickets.sort_by(|a, b| a.resolved.cmp(&b.resolved));
        tracing::info!(tickets = tickets.len(), "tickets accepted");

        let matched = correlate::correlate(&mut commits, &mut tickets);
        tracing::info!(matched, tickets = tickets.len(), "correlation complete");
        if tickets.is_empty() {
            return Err(Error::EmptyTicketCorpus);
        }

        let mut classes = class::collect(&timeline, &commits, self.vcs)?;
        metrics::compute(&mut classes, &commits, self.vcs)?;

        let strategy = self.config.proportion.strategy();
        let mut estimated = tickets.clone();
        let trace = strategy.estimate(&mut estimated, &timeline)?;
        tracing::info!(
            estimated = trace.estimated_count(),
            strategy = %self.config.proportion,
            "injected versions estimated"
        );

        let iterations = walkforward::run(
            &timeline,
            &tickets,
            &estimated,
            &commits,
            &classes,
            self.vcs,
            strategy.as_ref(),
        )?;
        tracing::info!(iterations = iterations.len(), "walk-forward complete");

        Ok(MinedDataset {
            timeline,
            tickets: estimated,
            classes,
            iterations,
            trace,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
