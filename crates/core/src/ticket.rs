// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bug ticket entities.
//!
//! A ticket carries four version markers, all expressed as release
//! ordinals once resolved against the timeline:
//!
//! - OV, opening version: first release affected as reported at
//!   creation time;
//! - FV, fixed version: first release no longer affected;
//! - AV list, affected versions: tracker-reported releases known to
//!   contain the bug, ordered by release date;
//! - IV, injected version: release the bug was introduced in. Equal to
//!   the first AV when the tracker reported any, otherwise unknown
//!   until the proportion estimator fills it in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::release::ReleaseTimeline;
use crate::source::RawTicket;

/// One accepted bug ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Tracker key, e.g. "STORM-1105".
    pub key: String,
    pub created: NaiveDate,
    pub resolved: NaiveDate,
    /// Opening version ordinal.
    pub ov: u32,
    /// Fixed version ordinal.
    pub fv: u32,
    /// Injected version ordinal; None until estimated.
    pub iv: Option<u32>,
    /// Affected version ordinals, sorted by release date.
    pub affected: Vec<u32>,
    /// Hashes of the commits matched to this ticket, deduplicated.
    pub commits: Vec<String>,
}

impl Ticket {
    /// Resolves a raw ticket record against the timeline.
    ///
    /// Returns None (record dropped) when a date is unparseable, the
    /// creation date is after the resolution date, or the opening or
    /// fixed version name has no release on the timeline. Affected
    /// version names that do not resolve are skipped individually: a
    /// release absent from the timeline owned no commits and holds no
    /// information.
    pub fn resolve(raw: &RawTicket, timeline: &ReleaseTimeline) -> Option<Self> {
        let created: NaiveDate = raw.created.parse().ok()?;
        let resolved: NaiveDate = raw.resolved.parse().ok()?;
        if created > resolved {
            tracing::debug!(key = %raw.key, "created after resolved, dropped");
            return None;
        }

        let ov = timeline.by_name(&raw.opening_version)?.ordinal();
        let fv = timeline.by_name(&raw.fixed_version)?.ordinal();

        let mut affected: Vec<u32> = raw
            .affected_versions
            .iter()
            .filter_map(|name| timeline.by_name(name))
            .map(|r| r.ordinal())
            .collect();
        // Ordinals follow date order, so sorting them sorts by date.
        affected.sort_unstable();
        affected.dedup();

        // IV = AV[0] by definition when the tracker reported any AV.
        let iv = affected.first().copied();

        Some(Ticket {
            key: raw.key.clone(),
            created,
            resolved,
            ov,
            fv,
            iv,
            affected,
            commits: Vec::new(),
        })
    }

    /// True when the tracker reported the injected version directly.
    pub fn has_known_iv(&self) -> bool {
        !self.affected.is_empty()
    }

    /// Records a matched commit, ignoring duplicates.
    pub fn add_commit(&mut self, hash: &str) {
        if !self.commits.iter().any(|h| h == hash) {
            self.commits.push(hash.to_string());
        }
    }

    /// The ticket as it would have been known at release `ordinal`.
    ///
    /// Returns None when the fix itself postdates the cut (the ticket
    /// does not exist yet). Otherwise the affected list is clipped to
    /// ordinals `<= ordinal` and the IV re-derived from the clipped
    /// list, so a later estimation pass sees exactly the information
    /// available at that point in history.
    pub fn clone_at(&self, ordinal: u32) -> Option<Self> {
        if self.fv > ordinal {
            return None;
        }
        let affected: Vec<u32> = self.affected.iter().copied().filter(|&o| o <= ordinal).collect();
        let iv = affected.first().copied();
        Some(Ticket {
            key: self.key.clone(),
            created: self.created,
            resolved: self.resolved,
            ov: self.ov,
            fv: self.fv,
            iv,
            affected,
            commits: self.commits.clone(),
        })
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
