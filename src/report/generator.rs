// SPDX-License-Identifier: PMPL-1.0-or-later

//! Backtest report generation logic

use crate::backtest::EventOutcome;
use crate::config::ScenarioConfig;
use crate::types::*;

pub struct ReportGenerator<'a> {
    scenario: &'a ScenarioConfig,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(scenario: &'a ScenarioConfig) -> Self {
        Self { scenario }
    }

    /// Aggregate per-event verdicts. An empty input yields a 0% WEAK report.
    pub fn summarize(&self, results: &[(String, SignatureResult)]) -> BacktestReport {
        let mut distribution = StrengthDistribution::default();
        let mut per_event = Vec::with_capacity(results.len());

        for (event_name, result) in results {
            distribution.record(result.signal_strength);
            per_event.push(EventVerdict::from_result(event_name.as_str(), result));
        }

        let total_events = per_event.len();
        let detected = per_event.iter().filter(|v| v.signature_detected).count();
        let detection_rate = if total_events == 0 {
            0.0
        } else {
            100.0 * detected as f64 / total_events as f64
        };

        BacktestReport {
            analysis_date: None,
            total_events,
            detection_rate,
            strength_distribution: distribution,
            per_event,
            scenario: self.classify(detection_rate),
            excluded_events: Vec::new(),
        }
    }

    /// Split outcomes into analyzed and excluded, then aggregate the former
    pub fn summarize_outcomes(&self, outcomes: Vec<EventOutcome>) -> BacktestReport {
        let mut included = Vec::new();
        let mut excluded = Vec::new();

        for outcome in outcomes {
            match outcome {
                EventOutcome::Analyzed { event_name, result } => {
                    included.push((event_name, result))
                }
                EventOutcome::Failed { event_name, error } => excluded.push(ExcludedEvent {
                    event_name,
                    kind: error.kind().to_string(),
                    reason: error.to_string(),
                }),
            }
        }

        let mut report = self.summarize(&included);
        report.excluded_events = excluded;
        report
    }

    pub fn classify(&self, detection_rate: f64) -> Scenario {
        if detection_rate >= self.scenario.valid_rate {
            Scenario::Valid
        } else if detection_rate >= self.scenario.moderate_rate {
            Scenario::Moderate
        } else {
            Scenario::Weak
        }
    }
}
