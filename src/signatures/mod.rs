// SPDX-License-Identifier: PMPL-1.0-or-later

//! Panic signature detection
//!
//! A signature is the conjunction of state count, regional spread and
//! major-state presence; an event is detected when enough of them hold.

pub mod engine;
pub mod rules;
pub mod summary;

use crate::config::SignatureConfig;
use crate::error::AtlasResult;
use crate::regions::RegionTable;
use crate::types::*;

pub use engine::SignatureEngine;
pub use rules::{Criterion, RuleSet};

/// Detect the panic signature in one event
pub fn detect(
    event: &EventRecord,
    config: &SignatureConfig,
    table: &RegionTable,
) -> AtlasResult<SignatureResult> {
    SignatureEngine::new(config, table).detect(event)
}
