// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console rendering of event verdicts and backtest reports

use crate::config::SignatureConfig;
use crate::regions::RegionTable;
use crate::scoring::rank_states;
use crate::signatures::{Criterion, RuleSet};
use crate::types::*;
use colored::*;

const CONSOLE_TOP_STATES: usize = 5;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_event(
        &self,
        record: &EventRecord,
        result: &SignatureResult,
        config: &SignatureConfig,
        table: &RegionTable,
    ) {
        println!("\n{}", format!("=== ANALYZING: {} ===", record.name()).bold().cyan());
        println!();

        let window = &record.window;
        println!("  Event Date: {}", window.event_date);
        println!(
            "  Analysis Window: {} to {} ({} days)",
            window.window_start,
            window.window_end(),
            window.window_days
        );
        println!();

        println!("{}", "SUMMARY STATISTICS".bold().yellow());
        println!(
            "  States Above Threshold ({}): {}",
            config.threshold, result.criteria.state_count.value
        );
        println!(
            "  Regions Affected: {}/{}",
            result.criteria.regional_spread.value,
            table.regions().len()
        );
        println!();

        println!("  Top {} Panicking States:", CONSOLE_TOP_STATES);
        for (i, state) in rank_states(&record.state_scores)
            .iter()
            .take(CONSOLE_TOP_STATES)
            .enumerate()
        {
            println!("    {}. {}: {:.1}", i + 1, state.state, state.score);
        }
        println!();

        if !result.regions_affected.is_empty() {
            println!("  Affected Regions:");
            for region in &result.regions_affected {
                println!("    - {}", region);
            }
            println!();
        }

        self.print_criteria(result, config);
        println!();

        if result.signature_detected {
            println!(
                "{}",
                format!(
                    "PATTERN DETECTED - would trigger {} signal",
                    result.signal_strength
                )
                .green()
                .bold()
            );
        } else {
            println!("{}", "PATTERN NOT DETECTED - no tradeable signal".red().bold());
        }
    }

    fn print_criteria(&self, result: &SignatureResult, config: &SignatureConfig) {
        println!("{}", "PANIC SIGNATURE ANALYSIS".bold().yellow());
        println!(
            "  Signal Strength: {}",
            strength_colored(result.signal_strength)
        );
        println!("  Criteria Met: {}/3", result.criteria_met);
        println!();

        let criteria = &result.criteria;
        for criterion in RuleSet::new().criteria() {
            let (met, detail) = match criterion {
                Criterion::StateCount => (
                    criteria.state_count.met,
                    format!(
                        "{} states (need {})",
                        criteria.state_count.value, criteria.state_count.required
                    ),
                ),
                Criterion::RegionalSpread => (
                    criteria.regional_spread.met,
                    format!(
                        "{} regions (need {})",
                        criteria.regional_spread.value, criteria.regional_spread.required
                    ),
                ),
                Criterion::MajorStates => (
                    criteria.major_states.met,
                    format!(
                        "{} present: {}  |  top 3: {}",
                        config.major_states.join("/"),
                        criteria.major_states.present,
                        criteria.major_states.top_states.join(", ")
                    ),
                ),
            };
            let mark = if met { "✓".green() } else { "✗".red() };
            println!("  {} {}", mark, criterion.label().bold());
            println!("      {}", detail);
            println!("      {}", criterion.describe(config).dimmed());
        }
    }

    pub fn print_backtest(&self, report: &BacktestReport) {
        println!("\n{}", "=== PANIC-ATLAS BACKTEST REPORT ===".bold().cyan());
        println!();

        println!("{}", "OVERALL STATISTICS".bold().yellow());
        println!("  Total Events Analyzed: {}", report.total_events);
        println!(
            "  Pattern Detected: {}/{} ({:.1}%)",
            report.detected_count(),
            report.total_events,
            report.detection_rate
        );
        println!("  STRONG Signals: {}", report.strength_distribution.strong);
        println!("  MEDIUM Signals: {}", report.strength_distribution.medium);
        println!("  WEAK Signals: {}", report.strength_distribution.weak);
        println!();

        println!("  Events WITH Pattern:");
        for verdict in report.per_event.iter().filter(|v| v.signature_detected) {
            println!(
                "    [{}] {}",
                strength_colored(verdict.signal_strength),
                verdict.event_name
            );
        }
        println!();

        println!("  Events WITHOUT Pattern:");
        for verdict in report.per_event.iter().filter(|v| !v.signature_detected) {
            println!("    {}", verdict.event_name);
        }
        println!();

        if !report.excluded_events.is_empty() {
            println!("{}", "EXCLUDED EVENTS".bold().red());
            for excluded in &report.excluded_events {
                println!(
                    "    {} ({}): {}",
                    excluded.event_name,
                    excluded.kind,
                    excluded.reason.dimmed()
                );
            }
            println!();
        }

        self.print_scenario(report);
    }

    fn print_scenario(&self, report: &BacktestReport) {
        let headline = format!(
            "RESULT: {} - {:.1}% detection rate",
            report.scenario, report.detection_rate
        );
        let headline = match report.scenario {
            Scenario::Valid => headline.green().bold(),
            Scenario::Moderate => headline.yellow().bold(),
            Scenario::Weak => headline.red().bold(),
        };
        println!("{}", headline);
        for line in scenario_guidance(report.scenario) {
            println!("  - {}", line);
        }
        println!();
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Follow-up guidance printed under each scenario headline
pub fn scenario_guidance(scenario: Scenario) -> &'static [&'static str] {
    match scenario {
        Scenario::Valid => &[
            "System is valid and tradeable",
            "Pattern is a reliable predictor",
            "Ready for launch",
        ],
        Scenario::Moderate => &[
            "System works but needs refinement",
            "Consider combining with other indicators",
            "6-12 months additional development recommended",
        ],
        Scenario::Weak => &[
            "Core hypothesis does not hold with this data",
            "Consider a pivot or better data sources",
            "Re-evaluate methodology",
        ],
    }
}

fn strength_colored(strength: SignalStrength) -> ColoredString {
    match strength {
        SignalStrength::Strong => strength.as_str().green().bold(),
        SignalStrength::Medium => strength.as_str().yellow().bold(),
        SignalStrength::Weak => strength.as_str().red(),
    }
}
