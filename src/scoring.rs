// SPDX-License-Identifier: PMPL-1.0-or-later

//! Panic scoring: one scalar per state from its keyword intensities
//!
//! The score is the mean of the *positive* intensities, rounded to one
//! decimal. Keywords with no search volume are left out of the denominator
//! so they cannot dilute keywords that did spike.

use crate::types::{KeywordIntensityMap, StatePanicScore};

/// Score a keyword intensity map. Empty or all-zero maps score `0.0`.
pub fn score(raw: &KeywordIntensityMap) -> f64 {
    let (sum, count) = raw
        .values()
        .filter(|v| **v > 0)
        .fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(*v), count + 1));

    if count == 0 {
        return 0.0;
    }

    round_tenths(sum as f64 / count as f64)
}

/// Score a state, keeping the raw map alongside the result
pub fn score_state(state: impl Into<String>, raw: KeywordIntensityMap) -> StatePanicScore {
    StatePanicScore {
        state: state.into(),
        score: score(&raw),
        raw,
    }
}

/// Rank states by score, highest first.
///
/// The sort is stable: states with equal scores keep their input order.
pub fn rank_states(state_scores: &[StatePanicScore]) -> Vec<&StatePanicScore> {
    let mut ranked: Vec<&StatePanicScore> = state_scores.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

// Rounds the exact binary value of `mean`, ties to even: 21/20 is stored
// just above 1.05 and rounds up.
fn round_tenths(mean: f64) -> f64 {
    format!("{:.1}", mean).parse().unwrap_or(mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, u32)]) -> KeywordIntensityMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_map_scores_zero() {
        assert_eq!(score(&KeywordIntensityMap::new()), 0.0);
    }

    #[test]
    fn test_all_zero_scores_zero() {
        assert_eq!(score(&map(&[("a", 0), ("b", 0)])), 0.0);
    }

    #[test]
    fn test_zero_excluded_from_mean() {
        assert_eq!(score(&map(&[("a", 0), ("b", 50)])), 50.0);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 200 / 3 = 66.666...
        assert_eq!(score(&map(&[("a", 100), ("b", 50), ("c", 50)])), 66.7);
        // 10 / 3 = 3.333...
        assert_eq!(score(&map(&[("a", 3), ("b", 3), ("c", 4)])), 3.3);
    }

    #[test]
    fn test_exact_half_rounds_to_even() {
        // 289 / 4 = 72.25 -> 72.2
        assert_eq!(score(&map(&[("a", 72), ("b", 72), ("c", 72), ("d", 73)])), 72.2);
        // 291 / 4 = 72.75 -> 72.8
        assert_eq!(score(&map(&[("a", 72), ("b", 73), ("c", 73), ("d", 73)])), 72.8);
    }

    #[test]
    fn test_rounds_binary_mean_not_exact_fraction() {
        // 21 / 20 is stored as 1.0500000000000000444, so it rounds up
        let mut raw = map(&[("k00", 2)]);
        for i in 1..20 {
            raw.insert(format!("k{:02}", i), 1);
        }
        assert_eq!(score(&raw), 1.1);

        // 1401 / 20 = 70.05 is stored just below, so it stays under 70.1
        let mut raw = map(&[("k00", 81)]);
        for i in 1..20 {
            raw.insert(format!("k{:02}", i), 70);
        }
        assert_eq!(score(&raw), 70.0);
    }

    #[test]
    fn test_score_stays_in_range() {
        let full = map(&[("a", 100), ("b", 100), ("c", 100)]);
        assert_eq!(score(&full), 100.0);
    }

    #[test]
    fn test_score_state_keeps_raw() {
        let raw = map(&[("recession", 80), ("layoffs", 0)]);
        let scored = score_state("Ohio", raw.clone());
        assert_eq!(scored.state, "Ohio");
        assert_eq!(scored.score, 80.0);
        assert_eq!(scored.raw, raw);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let scores = vec![
            score_state("Texas", map(&[("a", 50)])),
            score_state("Ohio", map(&[("a", 90)])),
            score_state("Iowa", map(&[("a", 50)])),
            score_state("Utah", map(&[("a", 50)])),
        ];
        let names: Vec<&str> = rank_states(&scores)
            .iter()
            .map(|s| s.state.as_str())
            .collect();
        assert_eq!(names, vec!["Ohio", "Texas", "Iowa", "Utah"]);
    }
}
