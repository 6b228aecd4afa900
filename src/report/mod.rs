// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report generation module

pub mod formatter;
pub mod generator;
pub mod output;

use crate::config::ScenarioConfig;
use crate::types::*;

pub use formatter::ReportFormatter;
pub use generator::ReportGenerator;
pub use output::ReportOutputFormat;

/// Aggregate per-event verdicts into a backtest report
pub fn summarize(results: &[(String, SignatureResult)], scenario: &ScenarioConfig) -> BacktestReport {
    ReportGenerator::new(scenario).summarize(results)
}

/// Print a backtest report to the console
pub fn print_report(report: &BacktestReport) {
    ReportFormatter::new().print_backtest(report);
}
