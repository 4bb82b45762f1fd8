// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::testutil::{date, timeline};

#[test]
fn new_parses_date() {
    let release = Release::new("1", "4.2.0", "2020-06-15").unwrap();
    assert_eq!(release.date, date("2020-06-15"));
    assert_eq!(release.date_string, "2020-06-15");
    assert!(!release.synthetic);
    assert_eq!(release.ordinal(), 0);
}

#[test]
fn new_rejects_bad_date() {
    assert!(Release::new("1", "4.2.0", "June 15th").is_err());
}

#[test]
fn synthetic_release_is_tagged() {
    let release = Release::synthetic(date("2021-01-01"));
    assert!(release.synthetic);
    assert!(release.name.starts_with(SYNTHETIC_PREFIX));
}

#[test]
fn push_keeps_date_order() {
    let mut tl = ReleaseTimeline::new();
    tl.push(Release::new("2", "b", "2020-02-01").unwrap());
    tl.push(Release::new("1", "a", "2020-01-01").unwrap());
    tl.push(Release::new("3", "c", "2020-03-01").unwrap());
    let names: Vec<_> = tl.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn push_rejects_duplicate_name() {
    let mut tl = ReleaseTimeline::new();
    assert!(tl.push(Release::new("1", "a", "2020-01-01").unwrap()));
    assert!(!tl.push(Release::new("2", "a", "2020-02-01").unwrap()));
    assert_eq!(tl.len(), 1);
}

#[test]
fn push_rejects_duplicate_date() {
    let mut tl = ReleaseTimeline::new();
    assert!(tl.push(Release::new("1", "a", "2020-01-01").unwrap()));
    assert!(!tl.push(Release::new("2", "b", "2020-01-01").unwrap()));
    assert_eq!(tl.len(), 1);
}

#[test]
fn ordinals_are_contiguous_and_monotonic() {
    let tl = timeline(&["2020-03-01", "2020-01-01", "2020-02-01"]);
    let ordinals: Vec<_> = tl.iter().map(Release::ordinal).collect();
    assert_eq!(ordinals, [1, 2, 3]);
    let mut previous: Option<&Release> = None;
    for release in tl.iter() {
        if let Some(prev) = previous {
            assert!(prev.date < release.date);
            assert!(prev.ordinal() < release.ordinal());
        }
        previous = Some(release);
    }
}

#[test]
fn assign_ordinals_is_idempotent() {
    let mut tl = ReleaseTimeline::new();
    tl.push(Release::new("1", "a", "2020-01-01").unwrap());
    tl.push(Release::new("2", "b", "2020-02-01").unwrap());
    tl.assign_ordinals();
    let first: Vec<_> = tl.iter().map(Release::ordinal).collect();
    tl.assign_ordinals();
    let second: Vec<_> = tl.iter().map(Release::ordinal).collect();
    assert_eq!(first, second);
}

#[test]
fn on_or_after_picks_earliest_match() {
    let tl = timeline(&["2020-01-01", "2020-02-01", "2020-03-01"]);
    assert_eq!(tl.on_or_after(date("2020-02-01")).unwrap().name, "r2");
    assert_eq!(tl.on_or_after(date("2020-02-02")).unwrap().name, "r3");
    assert!(tl.on_or_after(date("2020-03-02")).is_none());
}

#[test]
fn by_name_and_by_ordinal() {
    let tl = timeline(&["2020-01-01", "2020-02-01"]);
    assert_eq!(tl.by_name("r2").unwrap().ordinal(), 2);
    assert!(tl.by_name("r9").is_none());
    assert_eq!(tl.by_ordinal(1).unwrap().name, "r1");
    assert!(tl.by_ordinal(0).is_none());
    assert!(tl.by_ordinal(3).is_none());
}

#[test]
fn fill_gaps_covers_trailing_commits() {
    let mut tl = ReleaseTimeline::new();
    tl.push(Release::new("1", "a", "2020-01-01").unwrap());
    tl.push(Release::new("2", "b", "2020-03-01").unwrap());

    // 60-day span over 2 releases: synthetic releases every 30 days.
    let added = tl.fill_gaps(date("2020-01-01"), date("2020-05-10"));
    assert_eq!(added, 3);
    assert_eq!(tl.len(), 5);

    let last = tl.last().unwrap();
    assert!(last.synthetic);
    assert!(last.date >= date("2020-05-10"));

    tl.assign_ordinals();
    let ordinals: Vec<_> = tl.iter().map(Release::ordinal).collect();
    assert_eq!(ordinals, [1, 2, 3, 4, 5]);
}

#[test]
fn fill_gaps_noop_when_history_is_covered() {
    let mut tl = ReleaseTimeline::new();
    tl.push(Release::new("1", "a", "2020-01-01").unwrap());
    assert_eq!(tl.fill_gaps(date("2019-12-01"), date("2020-01-01")), 0);
    assert_eq!(tl.len(), 1);
}

#[test]
fn retain_with_commits_drops_empty_releases() {
    let mut tl = ReleaseTimeline::new();
    tl.push(Release::new("1", "r1", "2020-01-01").unwrap());
    tl.push(Release::new("2", "r2", "2020-02-01").unwrap());
    tl.push(Release::new("3", "r3", "2020-03-01").unwrap());

    tl.retain_with_commits(&[1, 0, 2]);
    tl.assign_ordinals();
    let names: Vec<_> = tl.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["r1", "r3"]);
    let ordinals: Vec<_> = tl.iter().map(Release::ordinal).collect();
    assert_eq!(ordinals, [1, 2]);
}

#[test]
fn subset_through_preserves_ordinals() {
    let tl = timeline(&["2020-01-01", "2020-02-01", "2020-03-01"]);
    let sub = tl.subset_through(2);
    assert_eq!(sub.len(), 2);
    assert_eq!(sub.last_ordinal(), 2);
    assert_eq!(sub.by_ordinal(2).unwrap().name, "r2");
    assert!(sub.by_ordinal(3).is_none());
}

#[test]
fn date_of_unknown_ordinal_errors() {
    let tl = timeline(&["2020-01-01"]);
    assert!(tl.date_of(1).is_ok());
    assert!(tl.date_of(2).is_err());
}
