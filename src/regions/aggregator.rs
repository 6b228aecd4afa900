// SPDX-License-Identifier: PMPL-1.0-or-later

//! Regional spread: which regions contain at least one panicking state

use crate::error::{AtlasError, AtlasResult};
use crate::regions::RegionTable;
use crate::types::StatePanicScore;
use std::collections::BTreeSet;

/// Names of regions with any member state scoring at or above `threshold`.
///
/// Regions come back in table order. Every scored state must be mapped by
/// the table, even ones below the threshold.
pub fn affected_regions(
    table: &RegionTable,
    state_scores: &[StatePanicScore],
    threshold: f64,
) -> AtlasResult<Vec<String>> {
    let mut hit: BTreeSet<&str> = BTreeSet::new();

    for entry in state_scores {
        let region = table
            .region_of(&entry.state)
            .ok_or_else(|| AtlasError::UnmappedState {
                state: entry.state.clone(),
            })?;
        if entry.score >= threshold {
            hit.insert(region.name.as_str());
        }
    }

    Ok(table
        .regions()
        .iter()
        .filter(|r| hit.contains(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect())
}
