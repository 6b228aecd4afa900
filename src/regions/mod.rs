// SPDX-License-Identifier: PMPL-1.0-or-later

//! Regional partition of the US states and the District of Columbia

pub mod aggregator;

use crate::error::{AtlasError, AtlasResult};
use serde::Serialize;
use std::collections::BTreeSet;

pub use aggregator::affected_regions;

/// All 51 recognized jurisdictions, in collector order
pub const US_STATES: [&str; 51] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "District of Columbia",
];

const NORTHEAST: &[&str] = &[
    "New York",
    "Pennsylvania",
    "Massachusetts",
    "New Jersey",
    "Connecticut",
    "Rhode Island",
    "Vermont",
    "New Hampshire",
    "Maine",
    "Delaware",
    "Maryland",
    "District of Columbia",
];

const SOUTHEAST: &[&str] = &[
    "Florida",
    "Georgia",
    "North Carolina",
    "South Carolina",
    "Virginia",
    "West Virginia",
    "Kentucky",
    "Tennessee",
    "Alabama",
    "Mississippi",
    "Louisiana",
];

const MIDWEST: &[&str] = &[
    "Ohio",
    "Illinois",
    "Michigan",
    "Indiana",
    "Wisconsin",
    "Minnesota",
    "Iowa",
    "Missouri",
    "North Dakota",
    "South Dakota",
    "Nebraska",
    "Kansas",
];

const SOUTHWEST: &[&str] = &["Texas", "Arizona", "New Mexico", "Oklahoma", "Arkansas"];

const WEST: &[&str] = &[
    "California",
    "Washington",
    "Oregon",
    "Nevada",
    "Idaho",
    "Montana",
    "Wyoming",
    "Utah",
    "Colorado",
    "Alaska",
    "Hawaii",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: String,
    pub members: BTreeSet<String>,
}

impl Region {
    fn new(name: &str, members: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            members: members.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn contains(&self, state: &str) -> bool {
        self.members.contains(state)
    }
}

/// Immutable state-to-region lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionTable {
    version: u32,
    regions: Vec<Region>,
}

impl RegionTable {
    /// Bumped whenever region membership changes
    pub const VERSION: u32 = 2;

    /// The five-region partition used by every backtest
    pub fn standard() -> Self {
        Self {
            version: Self::VERSION,
            regions: vec![
                Region::new("Northeast", NORTHEAST),
                Region::new("Southeast", SOUTHEAST),
                Region::new("Midwest", MIDWEST),
                Region::new("Southwest", SOUTHWEST),
                Region::new("West", WEST),
            ],
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_of(&self, state: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.contains(state))
    }

    /// Check that every jurisdiction belongs to exactly one region
    pub fn validate(&self) -> AtlasResult<()> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for region in &self.regions {
            for member in &region.members {
                if !US_STATES.contains(&member.as_str()) {
                    return Err(AtlasError::InvalidConfig(format!(
                        "region {} lists unknown state {}",
                        region.name, member
                    )));
                }
                if !seen.insert(member.as_str()) {
                    return Err(AtlasError::InvalidConfig(format!(
                        "state {} is assigned to more than one region",
                        member
                    )));
                }
            }
        }
        if let Some(missing) = US_STATES.iter().find(|s| !seen.contains(*s)) {
            return Err(AtlasError::InvalidConfig(format!(
                "state {} is not assigned to any region",
                missing
            )));
        }
        Ok(())
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::standard()
    }
}
