//! JSON reports written by the CLI for human review and for the storage
//! collaborator.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ParseError, ParseStats, ParsedResult};
use crate::error::Result;

/// Full parse output with provenance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub source_file: String,
    #[serde(flatten)]
    pub result: &'a ParsedResult,
}

/// Diagnostics only, for fixing the source file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub source_file: String,
    pub stats: &'a ParseStats,
    pub errors: &'a [ParseError],
}

/// `<dir>/<source stem>-<UTC timestamp>.json`
pub fn default_report_path(dir: &Path, source: &Path, at: DateTime<Utc>) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("listing");
    dir.join(format!("{}-{}.json", stem, at.format("%Y%m%dT%H%M%SZ")))
}

pub fn to_json<T: Serialize>(report: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Serialize `report` to `path`, creating parent directories.
pub fn write_report<T: Serialize>(path: &Path, report: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(report, pretty)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_report_path() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let path = default_report_path(Path::new("out"), Path::new("/data/pune inventory.csv"), at);
        assert_eq!(path, PathBuf::from("out/pune inventory-20260301T093000Z.json"));
    }

    #[test]
    fn test_report_flattens_result() {
        let result = ParsedResult::default();
        let report = ParseReport {
            generated_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            source_file: "a.csv".to_string(),
            result: &result,
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&report, false).unwrap()).unwrap();
        assert_eq!(value["sourceFile"], "a.csv");
        assert!(value["projects"].is_array());
        assert_eq!(value["stats"]["totalRows"], 0);
    }
}
