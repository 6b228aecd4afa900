// SPDX-License-Identifier: PMPL-1.0-or-later

//! Engine configuration
//!
//! Every threshold the engine uses lives here and is passed explicitly into
//! each call. Files may be JSON or YAML; missing keys take the defaults.

use crate::error::{AtlasError, AtlasResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-event signature thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Panic score at or above which a state counts as panicking
    pub threshold: f64,
    pub min_states: usize,
    pub min_regions: usize,
    pub major_states: Vec<String>,
    /// How deep into the ranking a major state may sit
    pub major_state_rank: usize,
    /// Criteria needed for a positive detection
    pub detection_quorum: u8,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            threshold: 70.0,
            min_states: 12,
            min_regions: 3,
            major_states: vec!["California".to_string(), "New York".to_string()],
            major_state_rank: 10,
            detection_quorum: 2,
        }
    }
}

impl SignatureConfig {
    pub fn validate(&self) -> AtlasResult<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(AtlasError::InvalidConfig(format!(
                "threshold must be within 0-100, got {}",
                self.threshold
            )));
        }
        if !(1..=3).contains(&self.detection_quorum) {
            return Err(AtlasError::InvalidConfig(format!(
                "detection_quorum must be 1, 2 or 3, got {}",
                self.detection_quorum
            )));
        }
        if self.major_state_rank == 0 {
            return Err(AtlasError::InvalidConfig(
                "major_state_rank must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Backtest-level validity thresholds, in detection-rate percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub valid_rate: f64,
    pub moderate_rate: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            valid_rate: 70.0,
            moderate_rate: 50.0,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> AtlasResult<()> {
        for (name, value) in [
            ("valid_rate", self.valid_rate),
            ("moderate_rate", self.moderate_rate),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AtlasError::InvalidConfig(format!(
                    "{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }
        if self.moderate_rate > self.valid_rate {
            return Err(AtlasError::InvalidConfig(format!(
                "moderate_rate ({}) exceeds valid_rate ({})",
                self.moderate_rate, self.valid_rate
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub signature: SignatureConfig,
    pub scenario: ScenarioConfig,
}

impl AtlasConfig {
    /// Load a JSON or YAML config file, picked by extension
    pub fn load(path: &Path) -> AtlasResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AtlasConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
                .map_err(|e| AtlasError::InvalidConfig(format!("{}: {}", path.display(), e)))?,
            _ => serde_json::from_str(&raw)
                .map_err(|e| AtlasError::InvalidConfig(format!("{}: {}", path.display(), e)))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AtlasResult<()> {
        self.signature.validate()?;
        self.scenario.validate()
    }
}
