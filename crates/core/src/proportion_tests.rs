// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::release::ReleaseTimeline;
use crate::testutil::{ticket, timeline};
use crate::ticket::Ticket;
use yare::parameterized;

// Three releases one month apart: r1(2020-01-01) r2(2020-02-01)
// r3(2020-03-01).
fn three_releases() -> ReleaseTimeline {
    timeline(&["2020-01-01", "2020-02-01", "2020-03-01"])
}

#[parameterized(
    incremental_lower = { "incremental", ProportionKind::Incremental },
    batch_lower = { "batch", ProportionKind::Batch },
    incremental_upper = { "INCREMENTAL", ProportionKind::Incremental },
    batch_mixed = { "Batch", ProportionKind::Batch },
)]
fn kind_from_str_valid(input: &str, expected: ProportionKind) {
    assert_eq!(input.parse::<ProportionKind>().unwrap(), expected);
}

#[parameterized(
    invalid = { "weighted" },
    empty = { "" },
)]
fn kind_from_str_invalid(input: &str) {
    assert!(input.parse::<ProportionKind>().is_err());
}

#[test]
fn kind_round_trips_through_display() {
    for kind in [ProportionKind::Incremental, ProportionKind::Batch] {
        assert_eq!(kind.to_string().parse::<ProportionKind>().unwrap(), kind);
    }
}

#[test]
fn known_iv_is_taken_from_first_affected_version() {
    // OV=r1, FV=r3, AV=[r2]: the IV is r2 directly, nothing estimated.
    let tl = three_releases();
    let mut tickets = vec![ticket("T1", "2020-01-05", "2020-02-20", 1, 3, &[2])];

    let trace = IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    assert_eq!(tickets[0].iv, Some(2));
    assert_eq!(trace.estimated_count(), 0);
    assert!(!trace.entries[0].estimated);
}

#[test]
fn estimates_from_single_known_ticket() {
    // known = {T1}: ratio(T1) = (3-2)/(3-1) = 0.5, so p = 0.5 and
    // IV(T2) = clamp(1, floor(3 - (3-1)*0.5), 3) = 2. The recomputed
    // AV list spans [IV, OV] = [2, 1], which is empty.
    let tl = three_releases();
    let mut tickets = vec![
        ticket("T1", "2020-01-05", "2020-02-20", 1, 3, &[2]),
        ticket("T2", "2020-01-06", "2020-02-25", 1, 3, &[]),
    ];

    let trace = IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    assert_eq!(tickets[1].iv, Some(2));
    assert!(tickets[1].affected.is_empty());
    let entry = &trace.entries[1];
    assert!(entry.estimated);
    assert_eq!(entry.basis, 1);
    assert!((entry.ratio - 0.5).abs() < f64::EPSILON);
}

#[test]
fn recomputed_affected_list_spans_iv_to_ov() {
    // known ratio 1.0 pushes the estimate to OV, so AV = [IV..=OV].
    let tl = three_releases();
    let mut tickets = vec![
        ticket("T1", "2020-01-05", "2020-02-20", 2, 3, &[1, 2]),
        ticket("T2", "2020-01-06", "2020-02-25", 2, 3, &[]),
    ];

    IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    // ratio(T1) = (3-1)/(3-2) = 2.0 -> raw = 3 - 1*2 = 1.
    assert_eq!(tickets[1].iv, Some(1));
    assert_eq!(tickets[1].affected, [1, 2]);
}

#[test]
fn empty_basis_estimates_iv_at_fixed_version() {
    // No known IV anywhere: p stays 0 and the estimate collapses to
    // FV, bounded by the timeline. Degraded, not an error.
    let tl = three_releases();
    let mut tickets = vec![ticket("T1", "2020-01-05", "2020-02-20", 1, 3, &[])];

    let trace = IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].iv, Some(3));
    assert_eq!(trace.entries[0].basis, 0);
}

#[test]
fn estimate_is_clamped_to_first_release() {
    // A ratio of 2.0 projects past the start of the timeline.
    let tl = three_releases();
    let mut tickets = vec![
        ticket("T1", "2020-01-05", "2020-02-20", 2, 3, &[1, 2]),
        ticket("T2", "2020-01-06", "2020-02-25", 1, 2, &[]),
    ];

    IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    // raw = 2 - (2-1)*2.0 = 0 -> clamped to 1.
    assert_eq!(tickets[1].iv, Some(1));
}

#[test]
fn zero_denominator_uses_one() {
    // OV == FV on both sides: ratio(T1) = (2-1)/1 = 1.0 and the
    // projection subtracts 1 * p from FV.
    let tl = three_releases();
    let mut tickets = vec![
        ticket("T1", "2020-01-05", "2020-02-20", 2, 2, &[1]),
        ticket("T2", "2020-01-06", "2020-02-25", 3, 3, &[]),
    ];

    IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    assert_eq!(tickets[1].iv, Some(2));
}

#[test]
fn tickets_resolved_before_first_known_iv_are_dropped() {
    let tl = three_releases();
    let mut tickets = vec![
        ticket("EARLY", "2020-01-02", "2020-01-15", 1, 2, &[]),
        ticket("KNOWN", "2020-01-05", "2020-02-01", 1, 3, &[1]),
        ticket("LATER", "2020-01-06", "2020-02-25", 1, 3, &[]),
    ];

    IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    let keys: Vec<_> = tickets.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, ["KNOWN", "LATER"]);
}

#[test]
fn incremental_only_learns_from_earlier_tickets() {
    // The unknown ticket resolves before the second known one, so its
    // estimate must use a basis of one, not two.
    let tl = three_releases();
    let mut tickets = vec![
        ticket("K1", "2020-01-05", "2020-01-20", 1, 3, &[2]),
        ticket("U1", "2020-01-06", "2020-02-01", 1, 3, &[]),
        ticket("K2", "2020-01-07", "2020-02-20", 2, 3, &[1, 2]),
    ];

    let trace = IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    let entry = trace.entries.iter().find(|e| e.key == "U1").unwrap();
    assert_eq!(entry.basis, 1);
    assert!((entry.ratio - 0.5).abs() < f64::EPSILON);
}

#[test]
fn estimator_is_deterministic() {
    let tl = three_releases();
    let build = || {
        vec![
            ticket("K1", "2020-01-05", "2020-01-20", 1, 3, &[2]),
            ticket("U1", "2020-01-06", "2020-02-01", 1, 3, &[]),
            ticket("K2", "2020-01-07", "2020-02-20", 2, 3, &[1, 2]),
            ticket("U2", "2020-01-08", "2020-02-25", 2, 3, &[]),
        ]
    };

    let mut first = build();
    let mut second = build();
    IncrementalProportion.estimate(&mut first, &tl).unwrap();
    IncrementalProportion.estimate(&mut second, &tl).unwrap();

    assert_eq!(first, second);
}

#[test]
fn batch_matches_incremental_when_known_tickets_come_first() {
    // All known-IV tickets resolve before every unknown one, so the
    // incremental basis equals the batch basis at each estimate.
    let tl = three_releases();
    let build = || {
        vec![
            ticket("K1", "2020-01-05", "2020-01-20", 1, 3, &[2]),
            ticket("K2", "2020-01-07", "2020-01-25", 2, 3, &[1, 2]),
            ticket("U1", "2020-01-06", "2020-02-01", 1, 3, &[]),
            ticket("U2", "2020-01-08", "2020-02-25", 2, 3, &[]),
        ]
    };

    let mut incremental = build();
    let mut batch = build();
    IncrementalProportion.estimate(&mut incremental, &tl).unwrap();
    BatchProportion.estimate(&mut batch, &tl).unwrap();

    let ivs = |tickets: &[Ticket]| -> Vec<(String, Option<u32>)> {
        tickets.iter().map(|t| (t.key.clone(), t.iv)).collect()
    };
    assert_eq!(ivs(&incremental), ivs(&batch));
}

#[test]
fn batch_uses_whole_corpus_as_basis() {
    let tl = three_releases();
    let mut tickets = vec![
        ticket("U1", "2020-01-06", "2020-01-10", 1, 3, &[]),
        ticket("K1", "2020-01-05", "2020-01-20", 1, 3, &[2]),
        ticket("K2", "2020-01-07", "2020-02-20", 2, 3, &[1, 2]),
    ];

    let trace = BatchProportion.estimate(&mut tickets, &tl).unwrap();

    // The unknown ticket resolves first but still sees both known
    // tickets; batch keeps it rather than dropping it.
    assert_eq!(tickets.len(), 3);
    let entry = trace.entries.iter().find(|e| e.key == "U1").unwrap();
    assert_eq!(entry.basis, 2);
}

#[test]
fn every_surviving_ticket_has_an_iv() {
    let tl = three_releases();
    let mut tickets = vec![
        ticket("K1", "2020-01-05", "2020-01-20", 1, 3, &[1]),
        ticket("U1", "2020-01-06", "2020-02-01", 1, 2, &[]),
        ticket("U2", "2020-01-08", "2020-02-25", 2, 3, &[]),
    ];

    IncrementalProportion.estimate(&mut tickets, &tl).unwrap();

    for ticket in &tickets {
        let iv = ticket.iv.unwrap();
        assert!(iv >= 1 && iv <= tl.last_ordinal());
    }
}
