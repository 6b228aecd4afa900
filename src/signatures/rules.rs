// SPDX-License-Identifier: PMPL-1.0-or-later

//! The three criteria that make up the panic signature

use crate::config::SignatureConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Enough individual states above the panic threshold
    StateCount,
    /// Panic present in enough distinct regions
    RegionalSpread,
    /// A bellwether state near the top of the ranking
    MajorStates,
}

impl Criterion {
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::StateCount => "state_count",
            Criterion::RegionalSpread => "regional_spread",
            Criterion::MajorStates => "major_states",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::StateCount => "State Count",
            Criterion::RegionalSpread => "Regional Spread",
            Criterion::MajorStates => "Major States",
        }
    }

    /// Human-readable rule under the given thresholds
    pub fn describe(&self, config: &SignatureConfig) -> String {
        match self {
            Criterion::StateCount => format!(
                "at least {} states with panic score >= {}",
                config.min_states, config.threshold
            ),
            Criterion::RegionalSpread => format!(
                "at least {} regions with a state scoring >= {}",
                config.min_regions, config.threshold
            ),
            Criterion::MajorStates => format!(
                "{} in the top {} states",
                config.major_states.join(" or "),
                config.major_state_rank
            ),
        }
    }
}

pub struct RuleSet {
    criteria: Vec<Criterion>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self {
            criteria: vec![
                Criterion::StateCount,
                Criterion::RegionalSpread,
                Criterion::MajorStates,
            ],
        }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
