// SPDX-License-Identifier: PMPL-1.0-or-later

//! Signature detection engine
//!
//! Evaluates the three criteria against one event's scored states and
//! turns the count of met criteria into a strength and a detection flag.

use crate::config::SignatureConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::regions::{affected_regions, RegionTable};
use crate::scoring::rank_states;
use crate::types::*;

/// Number of ranked states reported alongside the verdict
const REPORTED_TOP_STATES: usize = 3;

pub struct SignatureEngine<'a> {
    config: &'a SignatureConfig,
    regions: &'a RegionTable,
}

impl<'a> SignatureEngine<'a> {
    pub fn new(config: &'a SignatureConfig, regions: &'a RegionTable) -> Self {
        Self { config, regions }
    }

    /// Classify a single event
    pub fn detect(&self, event: &EventRecord) -> AtlasResult<SignatureResult> {
        if event.state_scores.is_empty() {
            return Err(AtlasError::InsufficientData {
                event: event.name().to_string(),
            });
        }

        let state_count = self.evaluate_state_count(&event.state_scores);

        let regions_affected =
            affected_regions(self.regions, &event.state_scores, self.config.threshold)?;
        let regional_spread = CriterionDetail {
            value: regions_affected.len(),
            required: self.config.min_regions,
            met: regions_affected.len() >= self.config.min_regions,
        };

        let major_states = self.evaluate_major_states(&event.state_scores);

        let criteria_met = [state_count.met, regional_spread.met, major_states.met]
            .iter()
            .filter(|met| **met)
            .count() as u8;

        log::debug!(
            "{}: state_count {}/{} ({}), regional_spread {}/{} ({}), major_states {:?} ({})",
            event.name(),
            state_count.value,
            state_count.required,
            state_count.met,
            regional_spread.value,
            regional_spread.required,
            regional_spread.met,
            major_states.matched,
            major_states.met
        );

        Ok(SignatureResult {
            signature_detected: criteria_met >= self.config.detection_quorum,
            signal_strength: SignalStrength::from_criteria_met(criteria_met),
            criteria_met,
            criteria: SignatureCriteria {
                state_count,
                regional_spread,
                major_states,
            },
            regions_affected,
        })
    }

    fn evaluate_state_count(&self, scores: &[StatePanicScore]) -> CriterionDetail {
        let value = scores
            .iter()
            .filter(|s| s.score >= self.config.threshold)
            .count();
        CriterionDetail {
            value,
            required: self.config.min_states,
            met: value >= self.config.min_states,
        }
    }

    fn evaluate_major_states(&self, scores: &[StatePanicScore]) -> MajorStateDetail {
        let ranked = rank_states(scores);
        let matched: Vec<String> = ranked
            .iter()
            .take(self.config.major_state_rank)
            .filter(|s| self.config.major_states.iter().any(|m| *m == s.state))
            .map(|s| s.state.clone())
            .collect();
        let present = !matched.is_empty();

        MajorStateDetail {
            present,
            met: present,
            matched,
            top_states: ranked
                .iter()
                .take(REPORTED_TOP_STATES)
                .map(|s| s.state.clone())
                .collect(),
        }
    }
}
