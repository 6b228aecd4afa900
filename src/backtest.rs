// SPDX-License-Identifier: PMPL-1.0-or-later

//! Backtest: batch signature analysis across historical events
//!
//! Loads every artifact in a data directory, runs detection on each one,
//! and reduces the verdicts into a single report. A failing event is kept
//! as a failed outcome and listed in the report; it never stops the run.

use crate::config::AtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::regions::RegionTable;
use crate::report::ReportGenerator;
use crate::signatures::SignatureEngine;
use crate::storage;
use crate::types::*;
use std::path::Path;

/// Result of analyzing one event in a batch
#[derive(Debug)]
pub enum EventOutcome {
    Analyzed {
        event_name: String,
        result: SignatureResult,
    },
    Failed {
        event_name: String,
        error: AtlasError,
    },
}

impl EventOutcome {
    pub fn new(event_name: impl Into<String>, result: AtlasResult<SignatureResult>) -> Self {
        let event_name = event_name.into();
        match result {
            Ok(result) => EventOutcome::Analyzed { event_name, result },
            Err(error) => EventOutcome::Failed { event_name, error },
        }
    }

    pub fn event_name(&self) -> &str {
        match self {
            EventOutcome::Analyzed { event_name, .. } | EventOutcome::Failed { event_name, .. } => {
                event_name
            }
        }
    }
}

/// Detect the signature in an already loaded event, auditing its recorded summary
pub fn analyze_record(
    record: &EventRecord,
    config: &AtlasConfig,
    table: &RegionTable,
) -> AtlasResult<SignatureResult> {
    audit_recorded_summary(record, config, table)?;
    SignatureEngine::new(&config.signature, table).detect(record)
}

/// Load and analyze a single event from `data_dir`
pub fn analyze_event(
    data_dir: &Path,
    event_name: &str,
    config: &AtlasConfig,
    table: &RegionTable,
) -> AtlasResult<(EventRecord, SignatureResult)> {
    let record = storage::load_event(data_dir, event_name)?;
    let result = analyze_record(&record, config, table)?;
    Ok((record, result))
}

/// Analyze every event artifact in `data_dir` and build the backtest report
pub fn run(data_dir: &Path, config: &AtlasConfig, table: &RegionTable) -> AtlasResult<BacktestReport> {
    let names = storage::discover_events(data_dir)?;
    log::info!(
        "analyzing {} events from {}",
        names.len(),
        data_dir.display()
    );

    let outcomes = names
        .iter()
        .map(|name| {
            let result = analyze_event(data_dir, name, config, table).map(|(_, result)| result);
            EventOutcome::new(name.as_str(), result)
        })
        .collect();

    let mut report = summarize(outcomes, config);
    report.analysis_date = Some(chrono::Utc::now().to_rfc3339());
    Ok(report)
}

/// Reduce a sequence of outcomes into a report, logging each exclusion
pub fn summarize(outcomes: Vec<EventOutcome>, config: &AtlasConfig) -> BacktestReport {
    for outcome in &outcomes {
        match outcome {
            EventOutcome::Analyzed { event_name, result } => log::info!(
                "{}: {} ({}/3 criteria, detected: {})",
                event_name,
                result.signal_strength,
                result.criteria_met,
                result.signature_detected
            ),
            EventOutcome::Failed { event_name, error } => {
                log::warn!("excluding {}: {}", event_name, error)
            }
        }
    }
    ReportGenerator::new(&config.scenario).summarize_outcomes(outcomes)
}

fn audit_recorded_summary(
    record: &EventRecord,
    config: &AtlasConfig,
    table: &RegionTable,
) -> AtlasResult<()> {
    let Some(recorded) = &record.recorded_summary else {
        return Ok(());
    };
    let computed = EventSummary::compute(&record.state_scores, &config.signature, table)?;
    for note in recorded.discrepancies(&computed) {
        log::warn!("{}: {}", record.name(), note);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let failed = EventOutcome::new(
            "Broken",
            Err(AtlasError::InsufficientData {
                event: "Broken".to_string(),
            }),
        );
        assert_eq!(failed.event_name(), "Broken");
        assert!(matches!(failed, EventOutcome::Failed { .. }));
    }

    #[test]
    fn test_summarize_excludes_failures() {
        let outcomes = vec![
            EventOutcome::new(
                "Missing",
                Err(AtlasError::DataNotFound {
                    path: "backtest_data/Missing_data.json".into(),
                }),
            ),
            EventOutcome::new(
                "Unmapped",
                Err(AtlasError::UnmappedState {
                    state: "Guam".to_string(),
                }),
            ),
        ];
        let report = summarize(outcomes, &AtlasConfig::default());
        assert_eq!(report.total_events, 0);
        assert_eq!(report.detection_rate, 0.0);
        assert_eq!(report.scenario, Scenario::Weak);
        assert_eq!(report.excluded_events.len(), 2);
        assert_eq!(report.excluded_events[1].kind, "unmapped_state");
    }
}
