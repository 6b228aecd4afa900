// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event artifact codec
//!
//! Artifacts are read field by field rather than through a derived
//! deserializer so every failure names the exact dotted path at fault.

use crate::config::SignatureConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::regions::RegionTable;
use crate::scoring::score_state;
use crate::signatures::summary::score_mismatches;
use crate::types::*;
use chrono::NaiveDate;
use serde_json::{Map, Value};

const MAX_INTENSITY: u64 = 100;

/// Parse an event artifact into an immutable record
pub fn parse_event(raw: &str) -> AtlasResult<EventRecord> {
    let root: Value =
        serde_json::from_str(raw).map_err(|e| AtlasError::malformed("$", e.to_string()))?;
    let (record, recorded_scores) = read_event(&root)?;

    for note in score_mismatches(
        recorded_scores.iter().map(|(s, v)| (s.as_str(), *v)),
        &record.state_scores,
    ) {
        log::warn!("{}: {}", record.name(), note);
    }

    Ok(record)
}

/// Recompute every panic score and the summary block of an artifact.
///
/// Fields the engine does not own are left untouched, so rescoring an
/// already rescored artifact is a no-op.
pub fn rescore(
    raw: &str,
    config: &SignatureConfig,
    table: &RegionTable,
) -> AtlasResult<(Value, EventRecord)> {
    let mut root: Value =
        serde_json::from_str(raw).map_err(|e| AtlasError::malformed("$", e.to_string()))?;
    let (record, _) = read_event(&root)?;
    let summary = EventSummary::compute(&record.state_scores, config, table)?;

    if let Some(states) = root.get_mut("state_data").and_then(Value::as_object_mut) {
        for scored in &record.state_scores {
            if let Some(entry) = states.get_mut(&scored.state).and_then(Value::as_object_mut) {
                entry.insert("panic_score".to_string(), Value::from(scored.score));
            }
        }
    }
    if let Some(obj) = root.as_object_mut() {
        obj.insert("summary".to_string(), summary_to_value(&summary));
    }

    Ok((root, record))
}

fn read_event(root: &Value) -> AtlasResult<(EventRecord, Vec<(String, f64)>)> {
    let root = as_object(root, "$")?;

    let event_name = str_field(root, "event_name", "event_name")?.to_string();
    let event_date = date_field(root, "event_date", "event_date")?;
    let window = read_window(root, event_name, event_date)?;

    let states = object_field(root, "state_data", "state_data")?;
    let mut state_scores = Vec::with_capacity(states.len());
    let mut recorded_scores = Vec::with_capacity(states.len());
    for (state, entry) in states {
        let path = format!("state_data.{}", state);
        let entry = as_object(entry, &path)?;
        let recorded = f64_field(entry, "panic_score", &format!("{}.panic_score", path))?;
        let raw = read_keywords(entry, &path)?;
        state_scores.push(score_state(state.as_str(), raw));
        recorded_scores.push((state.clone(), recorded));
    }

    let summary = read_summary(object_field(root, "summary", "summary")?)?;

    Ok((
        EventRecord {
            window,
            state_scores,
            recorded_summary: Some(summary),
        },
        recorded_scores,
    ))
}

fn read_window(
    root: &Map<String, Value>,
    event_name: String,
    event_date: NaiveDate,
) -> AtlasResult<EventWindow> {
    let raw = object_field(root, "analysis_window", "analysis_window")?;
    let start = date_field(raw, "start_date", "analysis_window.start_date")?;
    let end = date_field(raw, "end_date", "analysis_window.end_date")?;
    let days = u64_field(raw, "days_before", "analysis_window.days_before")?;
    let days = u32::try_from(days).map_err(|_| {
        AtlasError::malformed("analysis_window.days_before", format!("{} is out of range", days))
    })?;

    let window = EventWindow::try_new(event_name, event_date, days).ok_or_else(|| {
        AtlasError::malformed(
            "analysis_window.days_before",
            format!("{} days before {} is out of range", days, event_date),
        )
    })?;
    if window.window_start != start {
        return Err(AtlasError::malformed(
            "analysis_window.start_date",
            format!(
                "expected {} ({} days before {}), found {}",
                window.window_start, days, event_date, start
            ),
        ));
    }
    if end != event_date {
        return Err(AtlasError::malformed(
            "analysis_window.end_date",
            format!("expected event date {}, found {}", event_date, end),
        ));
    }
    Ok(window)
}

fn read_keywords(entry: &Map<String, Value>, path: &str) -> AtlasResult<KeywordIntensityMap> {
    let path = format!("{}.keyword_data", path);
    let keywords = object_field(entry, "keyword_data", &path)?;
    let mut raw = KeywordIntensityMap::new();
    for (keyword, value) in keywords {
        let field = format!("{}.{}", path, keyword);
        let intensity = value
            .as_u64()
            .ok_or_else(|| AtlasError::malformed(&field, "expected a non-negative integer"))?;
        if intensity > MAX_INTENSITY {
            return Err(AtlasError::malformed(
                &field,
                format!("intensity {} exceeds {}", intensity, MAX_INTENSITY),
            ));
        }
        raw.insert(keyword.clone(), intensity as u32);
    }
    Ok(raw)
}

fn read_summary(raw: &Map<String, Value>) -> AtlasResult<EventSummary> {
    let top = raw
        .get("top_10_states")
        .ok_or_else(|| missing("summary.top_10_states"))?
        .as_array()
        .ok_or_else(|| AtlasError::malformed("summary.top_10_states", "expected an array"))?;
    let mut top_10_states = Vec::with_capacity(top.len());
    for (idx, item) in top.iter().enumerate() {
        let path = format!("summary.top_10_states[{}]", idx);
        let item = as_object(item, &path)?;
        top_10_states.push(RankedState {
            state: str_field(item, "state", &format!("{}.state", path))?.to_string(),
            panic_score: f64_field(item, "panic_score", &format!("{}.panic_score", path))?,
        });
    }

    let regions = raw
        .get("regions_affected")
        .ok_or_else(|| missing("summary.regions_affected"))?
        .as_array()
        .ok_or_else(|| AtlasError::malformed("summary.regions_affected", "expected an array"))?;
    let regions_affected = regions
        .iter()
        .enumerate()
        .map(|(idx, v)| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                AtlasError::malformed(
                    format!("summary.regions_affected[{}]", idx),
                    "expected a string",
                )
            })
        })
        .collect::<AtlasResult<Vec<_>>>()?;

    Ok(EventSummary {
        states_above_threshold: u64_field(
            raw,
            "states_above_threshold",
            "summary.states_above_threshold",
        )? as usize,
        threshold_used: f64_field(raw, "threshold_used", "summary.threshold_used")?,
        top_10_states,
        regions_affected,
        total_regions_affected: u64_field(
            raw,
            "total_regions_affected",
            "summary.total_regions_affected",
        )? as usize,
    })
}

fn summary_to_value(summary: &EventSummary) -> Value {
    let top: Vec<Value> = summary
        .top_10_states
        .iter()
        .map(|s| {
            let mut entry = Map::new();
            entry.insert("state".to_string(), Value::from(s.state.clone()));
            entry.insert("panic_score".to_string(), Value::from(s.panic_score));
            Value::Object(entry)
        })
        .collect();

    let mut obj = Map::new();
    obj.insert(
        "states_above_threshold".to_string(),
        Value::from(summary.states_above_threshold),
    );
    obj.insert(
        "threshold_used".to_string(),
        whole_or_float(summary.threshold_used),
    );
    obj.insert("top_10_states".to_string(), Value::Array(top));
    obj.insert(
        "regions_affected".to_string(),
        Value::from(summary.regions_affected.clone()),
    );
    obj.insert(
        "total_regions_affected".to_string(),
        Value::from(summary.total_regions_affected),
    );
    Value::Object(obj)
}

// Collectors write integral thresholds as integers
fn whole_or_float(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn missing(path: &str) -> AtlasError {
    AtlasError::malformed(path, "missing required field")
}

fn as_object<'a>(value: &'a Value, path: &str) -> AtlasResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| AtlasError::malformed(path, "expected an object"))
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> AtlasResult<&'a Map<String, Value>> {
    as_object(obj.get(key).ok_or_else(|| missing(path))?, path)
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> AtlasResult<&'a str> {
    obj.get(key)
        .ok_or_else(|| missing(path))?
        .as_str()
        .ok_or_else(|| AtlasError::malformed(path, "expected a string"))
}

fn u64_field(obj: &Map<String, Value>, key: &str, path: &str) -> AtlasResult<u64> {
    obj.get(key)
        .ok_or_else(|| missing(path))?
        .as_u64()
        .ok_or_else(|| AtlasError::malformed(path, "expected a non-negative integer"))
}

fn f64_field(obj: &Map<String, Value>, key: &str, path: &str) -> AtlasResult<f64> {
    obj.get(key)
        .ok_or_else(|| missing(path))?
        .as_f64()
        .ok_or_else(|| AtlasError::malformed(path, "expected a number"))
}

fn date_field(obj: &Map<String, Value>, key: &str, path: &str) -> AtlasResult<NaiveDate> {
    let raw = str_field(obj, key, path)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AtlasError::malformed(path, format!("expected YYYY-MM-DD ({})", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact() -> Value {
        json!({
            "event_name": "SVB_Collapse",
            "event_date": "2023-03-10",
            "analysis_window": {
                "start_date": "2023-03-03",
                "end_date": "2023-03-10",
                "days_before": 7
            },
            "collection_timestamp": "2023-03-11T09:00:00",
            "state_data": {
                "Texas": {"panic_score": 75.0, "keyword_data": {"recession": 75, "layoffs": 0}},
                "Ohio": {"panic_score": 40.0, "keyword_data": {"recession": 30, "layoffs": 50}},
                "Maine": {"panic_score": 0, "keyword_data": {}}
            },
            "summary": {
                "states_above_threshold": 1,
                "threshold_used": 70,
                "top_10_states": [
                    {"state": "Texas", "panic_score": 75.0},
                    {"state": "Ohio", "panic_score": 40.0},
                    {"state": "Maine", "panic_score": 0}
                ],
                "regions_affected": ["Southwest"],
                "total_regions_affected": 1
            }
        })
    }

    #[test]
    fn test_parse_keeps_state_order_and_scores() {
        let record = parse_event(&artifact().to_string()).unwrap();
        assert_eq!(record.name(), "SVB_Collapse");
        assert_eq!(record.window.window_days, 7);
        let states: Vec<&str> = record.state_scores.iter().map(|s| s.state.as_str()).collect();
        assert_eq!(states, vec!["Texas", "Ohio", "Maine"]);
        assert_eq!(record.state_scores[0].score, 75.0);
        assert_eq!(record.state_scores[1].score, 40.0);
        assert_eq!(record.state_scores[2].score, 0.0);
        let summary = record.recorded_summary.unwrap();
        assert_eq!(summary.regions_affected, vec!["Southwest"]);
        assert_eq!(summary.threshold_used, 70.0);
    }

    fn expect_malformed(value: Value, field: &str) {
        match parse_event(&value.to_string()) {
            Err(AtlasError::MalformedRecord { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected malformed {}, got {:?}", field, other),
        }
    }

    #[test]
    fn test_missing_summary_field_is_named() {
        let mut value = artifact();
        value["summary"]
            .as_object_mut()
            .unwrap()
            .remove("total_regions_affected");
        expect_malformed(value, "summary.total_regions_affected");
    }

    #[test]
    fn test_bad_intensity_is_named() {
        let mut value = artifact();
        value["state_data"]["Ohio"]["keyword_data"]["layoffs"] = json!("high");
        expect_malformed(value, "state_data.Ohio.keyword_data.layoffs");

        let mut value = artifact();
        value["state_data"]["Ohio"]["keyword_data"]["layoffs"] = json!(140);
        expect_malformed(value, "state_data.Ohio.keyword_data.layoffs");
    }

    #[test]
    fn test_bad_date_is_named() {
        let mut value = artifact();
        value["event_date"] = json!("10/03/2023");
        expect_malformed(value, "event_date");
    }

    #[test]
    fn test_inconsistent_window_is_rejected() {
        let mut value = artifact();
        value["analysis_window"]["days_before"] = json!(5);
        expect_malformed(value, "analysis_window.start_date");
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_event("{not json"),
            Err(AtlasError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_rescore_rewrites_scores_and_summary() {
        let mut value = artifact();
        value["state_data"]["Ohio"]["panic_score"] = json!(12.5);
        value["summary"]["states_above_threshold"] = json!(9);

        let config = SignatureConfig::default();
        let table = RegionTable::standard();
        let (rescored, record) = rescore(&value.to_string(), &config, &table).unwrap();

        assert_eq!(record.state_scores.len(), 3);
        assert_eq!(rescored["state_data"]["Ohio"]["panic_score"], json!(40.0));
        assert_eq!(rescored["summary"]["states_above_threshold"], json!(1));
        assert_eq!(rescored["summary"]["threshold_used"], json!(70));
        assert_eq!(rescored["collection_timestamp"], json!("2023-03-11T09:00:00"));

        let (again, _) = rescore(&rescored.to_string(), &config, &table).unwrap();
        assert_eq!(again, rescored);
    }
}
