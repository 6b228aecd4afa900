// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event summary recomputation and auditing
//!
//! Collectors write a `summary` block next to the state data. The engine
//! never trusts it: the block is recomputed from the scores and any
//! disagreement is reported.

use crate::config::SignatureConfig;
use crate::error::AtlasResult;
use crate::regions::{affected_regions, RegionTable};
use crate::scoring::rank_states;
use crate::types::{EventSummary, RankedState, StatePanicScore};

const SUMMARY_TOP_STATES: usize = 10;

// Recorded scores are rounded to one decimal, compare with slack
const SCORE_TOLERANCE: f64 = 0.05;

impl EventSummary {
    /// Rebuild the summary block from scored states
    pub fn compute(
        state_scores: &[StatePanicScore],
        config: &SignatureConfig,
        table: &RegionTable,
    ) -> AtlasResult<Self> {
        let regions_affected = affected_regions(table, state_scores, config.threshold)?;
        let states_above_threshold = state_scores
            .iter()
            .filter(|s| s.score >= config.threshold)
            .count();
        let top_10_states = rank_states(state_scores)
            .into_iter()
            .take(SUMMARY_TOP_STATES)
            .map(|s| RankedState {
                state: s.state.clone(),
                panic_score: s.score,
            })
            .collect();

        Ok(Self {
            states_above_threshold,
            threshold_used: config.threshold,
            top_10_states,
            total_regions_affected: regions_affected.len(),
            regions_affected,
        })
    }

    /// Differences between a recorded summary and a recomputed one
    pub fn discrepancies(&self, computed: &EventSummary) -> Vec<String> {
        let mut notes = Vec::new();

        if (self.threshold_used - computed.threshold_used).abs() > f64::EPSILON {
            // Different threshold: the counts are not comparable
            notes.push(format!(
                "recorded summary used threshold {}, engine uses {}",
                self.threshold_used, computed.threshold_used
            ));
            return notes;
        }

        if self.states_above_threshold != computed.states_above_threshold {
            notes.push(format!(
                "states_above_threshold recorded {} vs computed {}",
                self.states_above_threshold, computed.states_above_threshold
            ));
        }
        if self.total_regions_affected != computed.total_regions_affected
            || self.regions_affected != computed.regions_affected
        {
            notes.push(format!(
                "regions_affected recorded {:?} vs computed {:?}",
                self.regions_affected, computed.regions_affected
            ));
        }

        let recorded_top: Vec<&str> = self.top_10_states.iter().map(|s| s.state.as_str()).collect();
        let computed_top: Vec<&str> = computed
            .top_10_states
            .iter()
            .map(|s| s.state.as_str())
            .collect();
        if recorded_top != computed_top {
            notes.push(format!(
                "top_10_states recorded {:?} vs computed {:?}",
                recorded_top, computed_top
            ));
        }

        notes
    }
}

/// States whose recorded panic score disagrees with the recomputed one
pub fn score_mismatches<'a>(
    recorded: impl IntoIterator<Item = (&'a str, f64)>,
    state_scores: &[StatePanicScore],
) -> Vec<String> {
    recorded
        .into_iter()
        .filter_map(|(state, recorded_score)| {
            let computed = state_scores.iter().find(|s| s.state == state)?;
            if (computed.score - recorded_score).abs() > SCORE_TOLERANCE {
                Some(format!(
                    "{}: recorded panic_score {} vs computed {}",
                    state, recorded_score, computed.score
                ))
            } else {
                None
            }
        })
        .collect()
}
