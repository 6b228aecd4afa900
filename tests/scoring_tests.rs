// SPDX-License-Identifier: PMPL-1.0-or-later

//! Scoring and regional aggregation properties

mod common;

use panic_atlas::events;
use panic_atlas::regions::{affected_regions, RegionTable, US_STATES};
use panic_atlas::scoring::{rank_states, score, score_state};
use panic_atlas::storage;
use panic_atlas::types::*;
use serde_json::json;

fn keywords(pairs: &[(&str, u32)]) -> KeywordIntensityMap {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_score_stays_in_range() {
    for a in (0..=100).step_by(7) {
        for b in (0..=100).step_by(11) {
            let s = score(&keywords(&[("recession", a), ("layoffs", b)]));
            assert!((0.0..=100.0).contains(&s), "{} from ({}, {})", s, a, b);
        }
    }
}

#[test]
fn test_adding_zero_keyword_never_changes_score() {
    let base = keywords(&[("recession", 64), ("bank run", 33), ("layoffs", 12)]);
    let mut padded = base.clone();
    padded.insert("stock market crash".to_string(), 0);
    padded.insert("unemployment".to_string(), 0);
    assert_eq!(score(&base), score(&padded));
}

#[test]
fn test_all_zero_scores_zero() {
    assert_eq!(score(&keywords(&[("recession", 0), ("layoffs", 0)])), 0.0);
    assert_eq!(score(&KeywordIntensityMap::new()), 0.0);
}

#[test]
fn test_every_jurisdiction_has_one_region() {
    let table = RegionTable::standard();
    for state in US_STATES {
        let owners = table.regions().iter().filter(|r| r.contains(state)).count();
        assert_eq!(owners, 1, "{} belongs to {} regions", state, owners);
    }
    let members: usize = table.regions().iter().map(|r| r.members.len()).sum();
    assert_eq!(members, US_STATES.len());
}

#[test]
fn test_affected_regions_shrink_as_threshold_rises() {
    let table = RegionTable::standard();
    let record = storage::parse_event(&common::artifact("SVB_Collapse", &common::STRONG, 20).to_string())
        .unwrap();

    let mut previous = usize::MAX;
    for threshold in [0.0, 20.0, 50.0, 70.0, 75.0, 80.0, 98.0, 99.0] {
        let regions = affected_regions(&table, &record.state_scores, threshold).unwrap();
        assert!(regions.len() <= previous);
        previous = regions.len();
    }
    assert_eq!(previous, 0);
}

#[test]
fn test_ranking_is_descending_and_complete() {
    let scores: Vec<StatePanicScore> = US_STATES
        .iter()
        .enumerate()
        .map(|(idx, state)| {
            score_state(*state, keywords(&[("recession", (idx as u32 * 37) % 101)]))
        })
        .collect();

    let ranked = rank_states(&scores);
    assert_eq!(ranked.len(), scores.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_catalog_windows_match_collector_artifacts() {
    for event in events::catalog() {
        let window = event.window(events::DEFAULT_DAYS_BEFORE).unwrap();
        let mut value = common::artifact(event.name, &[], 10);
        value["event_date"] = json!(event.date.format("%Y-%m-%d").to_string());
        value["analysis_window"] = json!({
            "start_date": window.window_start.format("%Y-%m-%d").to_string(),
            "end_date": window.window_end().format("%Y-%m-%d").to_string(),
            "days_before": window.window_days
        });

        let record = storage::parse_event(&value.to_string()).unwrap();
        assert_eq!(record.window, window);
    }
}
