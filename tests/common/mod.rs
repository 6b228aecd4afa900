// SPDX-License-Identifier: PMPL-1.0-or-later

//! Artifact fixtures shared by the integration tests

#![allow(dead_code)]

use panic_atlas::regions::US_STATES;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Build an artifact where every state has one keyword at `base` intensity,
/// except the listed overrides. Panic score equals the intensity.
pub fn artifact(event_name: &str, overrides: &[(&str, u32)], base: u32) -> Value {
    let mut states = Map::new();
    for state in US_STATES {
        let intensity = overrides
            .iter()
            .find(|(name, _)| *name == state)
            .map(|(_, v)| *v)
            .unwrap_or(base);
        states.insert(
            state.to_string(),
            json!({
                "panic_score": intensity as f64,
                "keyword_data": {
                    "recession": intensity,
                    "layoffs": 0
                }
            }),
        );
    }

    json!({
        "event_name": event_name,
        "event_date": "2023-03-10",
        "analysis_window": {
            "start_date": "2023-03-03",
            "end_date": "2023-03-10",
            "days_before": 7
        },
        "collection_timestamp": "2023-03-11T09:00:00",
        "state_data": Value::Object(states),
        "summary": {
            "states_above_threshold": 0,
            "threshold_used": 70,
            "top_10_states": [],
            "regions_affected": [],
            "total_regions_affected": 0
        }
    })
}

pub fn write_artifact(dir: &Path, event_name: &str, value: &Value) -> PathBuf {
    let path = dir.join(format!("{}_data.json", event_name));
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Fifteen states >= 70 across four regions with California on top
pub const STRONG: [(&str, u32); 15] = [
    ("California", 98),
    ("Oregon", 80),
    ("Washington", 79),
    ("Nevada", 78),
    ("Texas", 77),
    ("Arizona", 76),
    ("Ohio", 75),
    ("Illinois", 75),
    ("Michigan", 74),
    ("Indiana", 74),
    ("Florida", 73),
    ("Georgia", 72),
    ("Colorado", 71),
    ("Utah", 70),
    ("Idaho", 70),
];

/// Five Midwest states, California and New York far down the ranking
pub const WEAK: [(&str, u32); 12] = [
    ("Ohio", 90),
    ("Illinois", 88),
    ("Michigan", 86),
    ("Indiana", 84),
    ("Iowa", 82),
    ("Kansas", 60),
    ("Nebraska", 60),
    ("Missouri", 60),
    ("Wisconsin", 60),
    ("Minnesota", 60),
    ("California", 5),
    ("New York", 5),
];

/// Twelve Midwest states plus California on top: two criteria
pub const MEDIUM: [(&str, u32); 13] = [
    ("California", 95),
    ("Ohio", 80),
    ("Illinois", 80),
    ("Michigan", 80),
    ("Indiana", 80),
    ("Wisconsin", 80),
    ("Minnesota", 80),
    ("Iowa", 80),
    ("Missouri", 80),
    ("North Dakota", 80),
    ("South Dakota", 80),
    ("Nebraska", 80),
    ("Kansas", 80),
];
