// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Injected-version estimation via the proportion method.
//!
//! Tickets whose affected-version list is empty carry no injected
//! version. The proportion method learns the ratio
//! `(FV - IV) / (FV - OV)` from tickets where the IV is known and
//! projects it onto the ones where it is not:
//!
//! `IV = clamp(1, trunc(FV - (FV - OV) * p), last release)`
//!
//! with `FV - OV` treated as 1 when OV and FV coincide, in both the
//! ratio and the projection. Two strategies implement the same
//! contract: [`IncrementalProportion`] replays tickets in resolution
//! order and only ever learns from tickets resolved earlier, mirroring
//! how information genuinely became available; [`BatchProportion`]
//! learns one static ratio from the whole corpus up front.
//!
//! Each run returns a [`ProportionTrace`] describing what was learned
//! and what was estimated; no state is shared across runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::release::ReleaseTimeline;
use crate::ticket::Ticket;

/// Strategy selector, chosen by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProportionKind {
    /// Replay tickets in resolution order, learning as history unfolds.
    #[default]
    Incremental,
    /// One static ratio computed from every known-IV ticket.
    Batch,
}

impl ProportionKind {
    /// Returns the string representation used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProportionKind::Incremental => "incremental",
            ProportionKind::Batch => "batch",
        }
    }

    /// Builds the strategy implementation for this selector.
    pub fn strategy(&self) -> Box<dyn ProportionStrategy> {
        match self {
            ProportionKind::Incremental => Box::new(IncrementalProportion),
            ProportionKind::Batch => Box::new(BatchProportion),
        }
    }
}

impl fmt::Display for ProportionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProportionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "incremental" => Ok(ProportionKind::Incremental),
            "batch" => Ok(ProportionKind::Batch),
            _ => Err(Error::InvalidProportionKind(s.to_string())),
        }
    }
}

/// One per-ticket record of an estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub key: String,
    /// Size of the known-IV basis when this ticket was processed.
    pub basis: usize,
    /// The ticket's own ratio contribution (known IV), or the ratio
    /// used to estimate it (unknown IV).
    pub ratio: f64,
    pub estimated: bool,
}

/// Structured report of one estimation run.
///
/// Returned per run instead of accumulating into shared state, so
/// walk-forward iterations stay independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProportionTrace {
    pub entries: Vec<TraceEntry>,
}

impl ProportionTrace {
    /// Number of tickets whose IV was estimated (not directly known).
    pub fn estimated_count(&self) -> usize {
        self.entries.iter().filter(|e| e.estimated).count()
    }
}

/// Contract shared by both estimation strategies.
///
/// Mutates the ticket list in place: every surviving ticket ends with
/// an IV and an affected-version list. The incremental strategy may
/// also drop leading tickets that predate all usable information.
pub trait ProportionStrategy {
    fn estimate(&self, tickets: &mut Vec<Ticket>, timeline: &ReleaseTimeline)
        -> Result<ProportionTrace>;
}

/// Online estimator: later estimates depend only on earlier tickets.
pub struct IncrementalProportion;

impl ProportionStrategy for IncrementalProportion {
    fn estimate(
        &self,
        tickets: &mut Vec<Ticket>,
        timeline: &ReleaseTimeline,
    ) -> Result<ProportionTrace> {
        tickets.sort_by(|a, b| a.resolved.cmp(&b.resolved));

        // Nothing can be estimated before the first ticket with a known
        // IV: tickets resolved earlier are dropped, a boundary
        // condition rather than an error.
        if let Some(cutoff) = tickets.iter().find(|t| t.has_known_iv()).map(|t| t.resolved) {
            let before = tickets.len();
            tickets.retain(|t| t.resolved >= cutoff);
            if tickets.len() < before {
                tracing::debug!(
                    dropped = before - tickets.len(),
                    "tickets resolved before the first known IV dropped"
                );
            }
        }

        let last = timeline.last_ordinal();
        let mut ratios: Vec<f64> = Vec::new();
        let mut trace = ProportionTrace::default();

        for ticket in tickets.iter_mut() {
            if ticket.has_known_iv() {
                ticket.iv = ticket.affected.first().copied();
                let ratio = known_ratio(ticket);
                ratios.push(ratio);
                trace.entries.push(TraceEntry {
                    key: ticket.key.clone(),
                    basis: ratios.len(),
                    ratio,
                    estimated: false,
                });
            } else {
                let p = mean(&ratios);
                estimate_ticket(ticket, p, last, timeline)?;
                trace.entries.push(TraceEntry {
                    key: ticket.key.clone(),
                    basis: ratios.len(),
                    ratio: p,
                    estimated: true,
                });
            }
        }

        tracing::debug!(
            estimated = trace.estimated_count(),
            known = ratios.len(),
            "incremental proportion run complete"
        );
        Ok(trace)
    }
}

/// Batch estimator: one static ratio over the whole corpus.
pub struct BatchProportion;

impl ProportionStrategy for BatchProportion {
    fn estimate(
        &self,
        tickets: &mut Vec<Ticket>,
        timeline: &ReleaseTimeline,
    ) -> Result<ProportionTrace> {
        tickets.sort_by(|a, b| a.resolved.cmp(&b.resolved));

        let known: Vec<bool> = tickets.iter().map(Ticket::has_known_iv).collect();
        let mut ratios: Vec<f64> = Vec::new();
        for ticket in tickets.iter_mut().filter(|t| t.has_known_iv()) {
            ticket.iv = ticket.affected.first().copied();
            ratios.push(known_ratio(ticket));
        }

        let p = mean(&ratios);
        let basis = ratios.len();
        let last = timeline.last_ordinal();
        let mut trace = ProportionTrace::default();

        for (ticket, was_known) in tickets.iter_mut().zip(known) {
            if was_known {
                trace.entries.push(TraceEntry {
                    key: ticket.key.clone(),
                    basis,
                    ratio: known_ratio(ticket),
                    estimated: false,
                });
            } else {
                estimate_ticket(ticket, p, last, timeline)?;
                trace.entries.push(TraceEntry {
                    key: ticket.key.clone(),
                    basis,
                    ratio: p,
                    estimated: true,
                });
            }
        }

        tracing::debug!(
            estimated = trace.estimated_count(),
            known = basis,
            "batch proportion run complete"
        );
        Ok(trace)
    }
}

/// Ratio contribution of a ticket whose IV is directly known.
fn known_ratio(ticket: &Ticket) -> f64 {
    let iv = match ticket.iv {
        Some(iv) => f64::from(iv),
        None => return 0.0,
    };
    let fv = f64::from(ticket.fv);
    let ov = f64::from(ticket.ov);
    let denom = if ticket.fv == ticket.ov { 1.0 } else { fv - ov };
    (fv - iv) / denom
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Projects an IV for `ticket` with ratio `p`, then rebuilds its
/// affected list as every release with `IV <= ordinal <= OV`.
fn estimate_ticket(
    ticket: &mut Ticket,
    p: f64,
    last_ordinal: u32,
    timeline: &ReleaseTimeline,
) -> Result<()> {
    let fv = f64::from(ticket.fv);
    let spread = if ticket.fv == ticket.ov {
        1.0
    } else {
        fv - f64::from(ticket.ov)
    };
    // Truncation toward zero, then clamped to the timeline.
    let projected = (fv - spread * p) as i64;
    let ordinal = projected.clamp(1, i64::from(last_ordinal.max(1))) as u32;

    let release = timeline
        .by_ordinal(ordinal)
        .ok_or(Error::OrdinalOutOfRange(ordinal))?;
    ticket.iv = Some(release.ordinal());

    let ov = ticket.ov;
    ticket.affected = timeline
        .iter()
        .map(|r| r.ordinal())
        .filter(|&o| o >= ordinal && o <= ov)
        .collect();
    Ok(())
}

#[cfg(test)]
#[path = "proportion_tests.rs"]
mod tests;
