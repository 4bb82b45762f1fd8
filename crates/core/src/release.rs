// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Release entities and the project release timeline.
//!
//! A [`ReleaseTimeline`] is the ordered catalogue of project releases.
//! Ordinals are assigned exactly once, after the full release set is
//! known (including synthetic gap-filling releases), and are never
//! reassigned: every downstream numeric comparison between versions
//! relies on that stability.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name prefix for synthetic releases inserted by gap filling.
pub const SYNTHETIC_PREFIX: &str = "synthetic-";

/// One project release, real or synthetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Tracker-assigned identifier.
    pub id: String,
    /// Human-facing version name (e.g. "4.2.1").
    pub name: String,
    /// Release date as reported by the tracker, kept verbatim.
    pub date_string: String,
    /// Parsed calendar date (no time component).
    pub date: NaiveDate,
    /// True for gap-filling placeholders; excluded from emitted rows.
    pub synthetic: bool,
    /// 1-based position on the timeline; 0 until assigned.
    ordinal: u32,
}

impl Release {
    /// Creates a release, parsing its date eagerly.
    pub fn new(id: &str, name: &str, date_string: &str) -> Result<Self> {
        let date: NaiveDate = date_string.parse()?;
        Ok(Release {
            id: id.to_string(),
            name: name.to_string(),
            date_string: date_string.to_string(),
            date,
            synthetic: false,
            ordinal: 0,
        })
    }

    /// Creates a synthetic gap-filling release dated `date`.
    pub fn synthetic(date: NaiveDate) -> Self {
        let name = format!("{SYNTHETIC_PREFIX}{date}");
        Release {
            id: name.clone(),
            name,
            date_string: date.to_string(),
            date,
            synthetic: true,
            ordinal: 0,
        }
    }

    /// Timeline position, or 0 when not yet assigned.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

/// Ordered catalogue of releases with stable numeric ordinals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseTimeline {
    // Kept sorted by date at all times.
    releases: Vec<Release>,
}

impl ReleaseTimeline {
    pub fn new() -> Self {
        ReleaseTimeline { releases: Vec::new() }
    }

    /// Adds a release, keeping the timeline sorted by date.
    ///
    /// Returns false (and drops the release) when another release
    /// already carries the same name or date: two releases never share
    /// either.
    pub fn push(&mut self, release: Release) -> bool {
        let duplicate = self
            .releases
            .iter()
            .any(|r| r.name == release.name || r.date == release.date);
        if duplicate {
            tracing::debug!(name = %release.name, "duplicate release dropped");
            return false;
        }
        let pos = self.releases.partition_point(|r| r.date < release.date);
        self.releases.insert(pos, release);
        true
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter()
    }

    /// Assigns ordinals 1..=N in date order.
    ///
    /// Idempotent: a release whose ordinal is already set keeps it, so
    /// calling this twice never changes an assigned ordinal.
    pub fn assign_ordinals(&mut self) {
        for (i, release) in self.releases.iter_mut().enumerate() {
            if release.ordinal == 0 {
                release.ordinal = (i as u32) + 1;
            }
        }
    }

    /// Earliest release whose date is on or after `date`.
    pub fn on_or_after(&self, date: NaiveDate) -> Option<&Release> {
        self.releases.iter().find(|r| r.date >= date)
    }

    pub fn by_name(&self, name: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.name == name)
    }

    pub fn by_ordinal(&self, ordinal: u32) -> Option<&Release> {
        if ordinal == 0 {
            return None;
        }
        self.releases.iter().find(|r| r.ordinal == ordinal)
    }

    /// Date of the release at `ordinal`.
    pub fn date_of(&self, ordinal: u32) -> Result<NaiveDate> {
        self.by_ordinal(ordinal)
            .map(|r| r.date)
            .ok_or(Error::OrdinalOutOfRange(ordinal))
    }

    pub fn last(&self) -> Option<&Release> {
        self.releases.last()
    }

    /// Highest assigned ordinal, or 0 before assignment.
    pub fn last_ordinal(&self) -> u32 {
        self.releases.iter().map(Release::ordinal).max().unwrap_or(0)
    }

    /// Inserts synthetic releases past the last real release so commits
    /// dated after it still land on the timeline.
    ///
    /// Placeholders are spaced by the average inter-release gap (days
    /// between the first commit and the last known release, divided by
    /// the release count) and appended until `last_commit` is covered.
    /// Returns the number of releases added. Must run before
    /// [`Self::assign_ordinals`].
    pub fn fill_gaps(&mut self, first_commit: NaiveDate, last_commit: NaiveDate) -> usize {
        let Some(last_release) = self.releases.last() else {
            return 0;
        };
        let last_date = last_release.date;
        if last_commit <= last_date {
            return 0;
        }

        let span = (last_date - first_commit).num_days();
        let step = (span / self.releases.len() as i64).max(1) as u64;

        let mut added = 0;
        let mut current = last_date;
        loop {
            current = match current.checked_add_days(Days::new(step)) {
                Some(next) => next,
                None => break,
            };
            if self.push(Release::synthetic(current)) {
                added += 1;
            }
            if current >= last_commit {
                break;
            }
        }
        tracing::debug!(added, "gap filling appended synthetic releases");
        added
    }

    /// Drops releases that own zero commits.
    ///
    /// `commit_counts` is aligned with the current date order (see
    /// [`Self::iter`]). A release nobody committed into carries no
    /// observable class state, so it holds no information for the
    /// dataset. Must run before [`Self::assign_ordinals`] so ordinals
    /// stay contiguous.
    pub fn retain_with_commits(&mut self, commit_counts: &[usize]) {
        let mut idx = 0;
        self.releases.retain(|release| {
            let count = commit_counts.get(idx).copied().unwrap_or(0);
            idx += 1;
            if count == 0 {
                tracing::debug!(name = %release.name, "commitless release dropped");
            }
            count > 0
        });
    }

    /// Owned copy of the timeline restricted to ordinals `<= ordinal`.
    ///
    /// Assigned ordinals are preserved, so the subset stays contiguous
    /// 1..=ordinal.
    pub fn subset_through(&self, ordinal: u32) -> ReleaseTimeline {
        ReleaseTimeline {
            releases: self
                .releases
                .iter()
                .filter(|r| r.ordinal != 0 && r.ordinal <= ordinal)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;
