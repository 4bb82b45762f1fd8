// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Class-at-release entities.
//!
//! A [`ProjectClass`] is one source file as observed at the last commit
//! of one specific release. The same path appears once per release it
//! exists in, each occurrence carrying its own metrics and its own
//! buggy label.

use serde::{Deserialize, Serialize};

use crate::commit::Commit;
use crate::error::Result;
use crate::release::ReleaseTimeline;
use crate::source::Vcs;

/// Sum, maximum and mean of a per-revision line-count series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocStats {
    pub total: u32,
    pub max: u32,
    pub avg: f64,
}

/// Numeric row fields consumed by the dataset writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Line count of the file at the release's last commit.
    pub size: u32,
    /// Number of commits of the owning release that touched the file.
    pub revisions: u32,
    /// Distinct tickets fixed by those commits.
    pub fixes: u32,
    /// Distinct authors among those commits.
    pub authors: u32,
    pub added: LocStats,
    pub removed: LocStats,
    pub churn: LocStats,
}

/// One source file's state at one release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectClass {
    /// Repository path of the file.
    pub name: String,
    /// Ordinal of the owning release.
    pub release: u32,
    /// Defect label; fully recomputed on every labeling pass.
    pub buggy: bool,
    /// Hashes of same-release commits that touched this path.
    pub touching: Vec<String>,
    pub metrics: ClassMetrics,
}

impl ProjectClass {
    pub fn new(name: &str, release: u32, size: u32) -> Self {
        ProjectClass {
            name: name.to_string(),
            release,
            buggy: false,
            touching: Vec::new(),
            metrics: ClassMetrics { size, ..ClassMetrics::default() },
        }
    }
}

/// Collects the class-at-release entities for every release.
///
/// Each release is observed at its last commit: every source path
/// visible in that commit's tree becomes one entity owned by the
/// release. Releases without commits yield nothing.
pub fn collect(
    timeline: &ReleaseTimeline,
    commits: &[Commit],
    vcs: &dyn Vcs,
) -> Result<Vec<ProjectClass>> {
    let mut classes = Vec::new();
    for release in timeline.iter() {
        let ordinal = release.ordinal();
        let last = commits
            .iter()
            .filter(|c| c.release == ordinal)
            .max_by_key(|c| c.date);
        let Some(last) = last else {
            continue;
        };
        for (path, size) in vcs.tree_paths(&last.hash)? {
            classes.push(ProjectClass::new(&path, ordinal, size));
        }
    }
    classes.sort_by(|a, b| a.name.cmp(&b.name).then(a.release.cmp(&b.release)));
    tracing::debug!(count = classes.len(), "collected class-at-release entities");
    Ok(classes)
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;
