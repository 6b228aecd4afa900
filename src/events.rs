// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalogue of historical panic events and the tracked keyword set

use crate::types::EventWindow;
use chrono::NaiveDate;
use serde::Serialize;

/// Days of search history collected before each event
pub const DEFAULT_DAYS_BEFORE: u32 = 7;

/// Search terms collected for every state in a backtest window
pub const BACKTEST_KEYWORDS: [&str; 7] = [
    "recession",
    "stock market crash",
    "should I sell stocks",
    "layoffs",
    "unemployment",
    "market crash",
    "financial crisis",
];

const CATALOG: &[(&str, i32, u32, u32)] = &[
    ("COVID_Crash_Start", 2020, 2, 24),
    ("Circuit_Breaker_1", 2020, 3, 9),
    ("Circuit_Breaker_2", 2020, 3, 12),
    ("Black_Monday_2020", 2020, 3, 16),
    ("Election_Night_2020", 2020, 11, 3),
    ("GameStop_Mania", 2021, 1, 27),
    ("Tech_Correction", 2021, 2, 25),
    ("Inflation_Shock", 2021, 5, 12),
    ("Omicron_Variant", 2021, 11, 26),
    ("Russia_Ukraine", 2022, 2, 24),
    ("Fed_75bps_Shock", 2022, 6, 13),
    ("Jackson_Hole_Crash", 2022, 8, 26),
    ("CPI_Disaster", 2022, 9, 13),
    ("FTX_Implosion", 2022, 11, 9),
    ("SVB_Collapse", 2023, 3, 10),
    ("Banking_Contagion", 2023, 3, 13),
    ("First_Republic_Seized", 2023, 5, 1),
    ("Fitch_Downgrade", 2023, 8, 1),
    ("Yen_Carry_Unwind", 2024, 8, 5),
    ("Election_Volatility_2024", 2024, 11, 5),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalEvent {
    pub name: &'static str,
    pub date: NaiveDate,
}

impl HistoricalEvent {
    pub fn window(&self, days_before: u32) -> Option<EventWindow> {
        EventWindow::try_new(self.name, self.date, days_before)
    }
}

/// Backtest events in chronological order
pub fn catalog() -> Vec<HistoricalEvent> {
    CATALOG
        .iter()
        .filter_map(|(name, y, m, d)| {
            NaiveDate::from_ymd_opt(*y, *m, *d).map(|date| HistoricalEvent { name: *name, date })
        })
        .collect()
}

pub fn find(name: &str) -> Option<HistoricalEvent> {
    catalog().into_iter().find(|e| e.name.eq_ignore_ascii_case(name))
}
