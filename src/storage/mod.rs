// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event artifact discovery, loading, and report persistence

pub mod artifact;

use crate::error::{AtlasError, AtlasResult};
use crate::report::ReportOutputFormat;
use crate::types::{BacktestReport, EventRecord};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use artifact::{parse_event, rescore};

/// File name suffix of per-event collector artifacts
pub const ARTIFACT_SUFFIX: &str = "_data.json";

/// Base name of the aggregate backtest report
pub const SUMMARY_REPORT_STEM: &str = "summary_report";

pub fn artifact_path(data_dir: &Path, event_name: &str) -> PathBuf {
    data_dir.join(format!("{}{}", event_name, ARTIFACT_SUFFIX))
}

pub fn summary_report_path(data_dir: &Path, format: ReportOutputFormat) -> PathBuf {
    data_dir.join(format!("{}.{}", SUMMARY_REPORT_STEM, format.extension()))
}

/// Load `<data_dir>/<event_name>_data.json`
pub fn load_event(data_dir: &Path, event_name: &str) -> AtlasResult<EventRecord> {
    load_event_file(&artifact_path(data_dir, event_name))
}

pub fn load_event_file(path: &Path) -> AtlasResult<EventRecord> {
    if !path.is_file() {
        return Err(AtlasError::DataNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = read_artifact(path)?;
    parse_event(&raw)
}

pub fn read_artifact(path: &Path) -> AtlasResult<String> {
    fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Names of all events with an artifact in `data_dir`, sorted
pub fn discover_events(data_dir: &Path) -> AtlasResult<Vec<String>> {
    if !data_dir.is_dir() {
        return Err(AtlasError::DataNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(data_dir).map_err(|source| AtlasError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(ARTIFACT_SUFFIX))
                .filter(|stem| !stem.is_empty())
                .map(str::to_string)
        })
        .collect();

    names.sort();
    Ok(names)
}

/// Write a backtest report in the requested format
pub fn write_report(
    report: &BacktestReport,
    path: &Path,
    format: ReportOutputFormat,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let content = format.serialize(report)?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_only_artifacts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SVB_Collapse_data.json"), "{}").unwrap();
        fs::write(dir.path().join("FTX_Implosion_data.json"), "{}").unwrap();
        fs::write(dir.path().join("summary_report.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("old_data.json")).unwrap();

        let names = discover_events(dir.path()).unwrap();
        assert_eq!(names, vec!["FTX_Implosion", "SVB_Collapse"]);
    }

    #[test]
    fn test_missing_directory_is_data_not_found() {
        let dir = TempDir::new().unwrap();
        let err = discover_events(&dir.path().join("backtest_data")).unwrap_err();
        assert!(matches!(err, AtlasError::DataNotFound { .. }));
    }

    #[test]
    fn test_missing_event_is_data_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_event(dir.path(), "SVB_Collapse").unwrap_err();
        match err {
            AtlasError::DataNotFound { path } => {
                assert!(path.ends_with("SVB_Collapse_data.json"))
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_summary_report_path() {
        let dir = Path::new("backtest_data");
        assert_eq!(
            summary_report_path(dir, ReportOutputFormat::Json),
            PathBuf::from("backtest_data/summary_report.json")
        );
        assert_eq!(
            summary_report_path(dir, ReportOutputFormat::Yaml),
            PathBuf::from("backtest_data/summary_report.yaml")
        );
    }
}
