// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for panic-atlas
//!
//! Every value here is built once and never mutated afterwards; each stage
//! of the pipeline hands a fresh value to the next.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-keyword search intensity (0-100) for one state over one window
pub type KeywordIntensityMap = BTreeMap<String, u32>;

/// Scored panic level for a single state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePanicScore {
    pub state: String,
    pub score: f64,
    pub raw: KeywordIntensityMap,
}

/// Analysis window preceding a historical event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    pub event_name: String,
    pub event_date: NaiveDate,
    pub window_start: NaiveDate,
    pub window_days: u32,
}

impl EventWindow {
    /// `None` when the window would start before the earliest representable date
    pub fn try_new(
        event_name: impl Into<String>,
        event_date: NaiveDate,
        window_days: u32,
    ) -> Option<Self> {
        let window_start = event_date.checked_sub_days(Days::new(u64::from(window_days)))?;
        Some(Self {
            event_name: event_name.into(),
            event_date,
            window_start,
            window_days,
        })
    }

    /// The window closes on the event date itself
    pub fn window_end(&self) -> NaiveDate {
        self.event_date
    }
}

/// A state and its score as listed in an event summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedState {
    pub state: String,
    pub panic_score: f64,
}

/// The `summary` block of an event artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub states_above_threshold: usize,
    pub threshold_used: f64,
    pub top_10_states: Vec<RankedState>,
    pub regions_affected: Vec<String>,
    pub total_regions_affected: usize,
}

/// One historical event, loaded from a single artifact
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub window: EventWindow,
    pub state_scores: Vec<StatePanicScore>,
    /// Summary as written by the collector, kept for auditing only
    pub recorded_summary: Option<EventSummary>,
}

impl EventRecord {
    pub fn new(window: EventWindow, state_scores: Vec<StatePanicScore>) -> Self {
        Self {
            window,
            state_scores,
            recorded_summary: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.window.event_name
    }
}

/// Signal strength derived from the number of criteria met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStrength {
    Strong,
    Medium,
    Weak,
}

impl SignalStrength {
    pub fn from_criteria_met(criteria_met: u8) -> Self {
        match criteria_met {
            3 => SignalStrength::Strong,
            2 => SignalStrength::Medium,
            _ => SignalStrength::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "STRONG",
            SignalStrength::Medium => "MEDIUM",
            SignalStrength::Weak => "WEAK",
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed value, required value and outcome of a counting criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDetail {
    pub value: usize,
    pub required: usize,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorStateDetail {
    pub present: bool,
    pub met: bool,
    /// Major states found inside the ranking cutoff
    pub matched: Vec<String>,
    pub top_states: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureCriteria {
    pub state_count: CriterionDetail,
    pub regional_spread: CriterionDetail,
    pub major_states: MajorStateDetail,
}

/// Verdict for a single event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResult {
    pub signature_detected: bool,
    pub signal_strength: SignalStrength,
    pub criteria_met: u8,
    pub criteria: SignatureCriteria,
    pub regions_affected: Vec<String>,
}

impl SignatureResult {
    pub fn top_states(&self) -> &[String] {
        &self.criteria.major_states.top_states
    }
}

/// Per-event row of the backtest report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventVerdict {
    pub event_name: String,
    pub signature_detected: bool,
    pub signal_strength: SignalStrength,
    pub criteria_met: u8,
}

impl EventVerdict {
    pub fn from_result(event_name: impl Into<String>, result: &SignatureResult) -> Self {
        Self {
            event_name: event_name.into(),
            signature_detected: result.signature_detected,
            signal_strength: result.signal_strength,
            criteria_met: result.criteria_met,
        }
    }
}

/// An event left out of the aggregate, with the reason it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedEvent {
    pub event_name: String,
    pub kind: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthDistribution {
    #[serde(rename = "STRONG")]
    pub strong: usize,
    #[serde(rename = "MEDIUM")]
    pub medium: usize,
    #[serde(rename = "WEAK")]
    pub weak: usize,
}

impl StrengthDistribution {
    pub fn record(&mut self, strength: SignalStrength) {
        match strength {
            SignalStrength::Strong => self.strong += 1,
            SignalStrength::Medium => self.medium += 1,
            SignalStrength::Weak => self.weak += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.strong + self.medium + self.weak
    }
}

/// Validity classification for the hypothesis across a backtest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scenario {
    Valid,
    Moderate,
    Weak,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Valid => "VALID",
            Scenario::Moderate => "MODERATE",
            Scenario::Weak => "WEAK",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate report over a set of analyzed events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
    pub total_events: usize,
    #[serde(rename = "pattern_detection_rate")]
    pub detection_rate: f64,
    #[serde(rename = "signal_distribution")]
    pub strength_distribution: StrengthDistribution,
    #[serde(rename = "events")]
    pub per_event: Vec<EventVerdict>,
    pub scenario: Scenario,
    #[serde(default)]
    pub excluded_events: Vec<ExcludedEvent>,
}

impl BacktestReport {
    pub fn detected_count(&self) -> usize {
        self.per_event
            .iter()
            .filter(|v| v.signature_detected)
            .count()
    }
}
