// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Miner configuration.
//!
//! The orchestration layer picks the estimation strategy and whether
//! synthetic gap-filling releases are inserted. Everything defaults to
//! the incremental estimator with gap filling on.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::proportion::ProportionKind;

/// Knobs for one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Which proportion strategy estimates missing injected versions.
    pub proportion: ProportionKind,
    /// Insert synthetic releases past the last real one so trailing
    /// commits stay on the timeline.
    pub fill_release_gaps: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        MinerConfig {
            proportion: ProportionKind::Incremental,
            fill_release_gaps: true,
        }
    }
}

impl MinerConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
