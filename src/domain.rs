//! Output shapes of a parse run.
//!
//! Everything here is plain data handed to the caller. Field names serialize
//! in camelCase because the persistence and preview collaborators consume the
//! result as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ingest::headers::CanonicalField;

/// One input line mapped onto canonical fields. Every canonical field is
/// present; absent columns hold an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    values: BTreeMap<CanonicalField, String>,
}

impl RawRow {
    pub fn new() -> Self {
        let values = CanonicalField::ALL
            .iter()
            .map(|field| (*field, String::new()))
            .collect();
        Self { values }
    }

    pub fn get(&self, field: CanonicalField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_empty(&self, field: CanonicalField) -> bool {
        self.get(field).is_empty()
    }

    /// True when no canonical field carries a value.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    /// The field value, or `None` when empty.
    pub fn optional(&self, field: CanonicalField) -> Option<String> {
        let value = self.get(field);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Default for RawRow {
    fn default() -> Self {
        Self::new()
    }
}

/// A real-estate development from one builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,
    pub project_name: String,
    pub builder: String,
    pub location: String,
    pub land_parcel: Option<String>,
    pub tower_count: Option<String>,
    pub launch_date: Option<String>,
    pub expected_possession: Option<String>,
    pub details: Option<String>,
    pub sales_person_name: String,
    pub sales_person_phone: String,
}

/// Price span in lakhs. Both bounds are zero when the source text held no
/// recognizable amount; `original_format` always keeps the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub original_format: String,
    pub is_range: bool,
}

impl PriceRange {
    pub fn unparsed(original: &str) -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            original_format: original.to_string(),
            is_range: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnitStatus {
    #[default]
    Available,
    SoldOut,
    LaunchingSoon,
    FuturePhase,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::SoldOut => "sold-out",
            UnitStatus::LaunchingSoon => "launching-soon",
            UnitStatus::FuturePhase => "future-phase",
        }
    }
}

/// One marketable unit type within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConfiguration {
    pub config_id: String,
    pub project_id: String,
    pub specification: String,
    pub tower: Option<String>,
    pub floor: Option<String>,
    pub flats_per_floor: Option<String>,
    pub construction: Option<String>,
    pub parking: Option<String>,
    pub possession: Option<String>,
    pub details: Option<String>,
    /// Square feet, ascending, no duplicates.
    pub carpet_areas: Vec<f64>,
    pub price_range: PriceRange,
    pub total_units: u32,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    pub status: UnitStatus,
    pub raw_csv_row: RawRow,
}

/// A row that failed while being processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    /// 1-based line number in the source text; the header is line 1.
    pub row_number: usize,
    pub field: String,
    /// The raw line text.
    pub value: String,
    pub reason: String,
}

/// Rows dropped without being an error, by the check that dropped them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipCounts {
    pub blank: usize,
    pub missing_specification: usize,
    pub note_row: usize,
    pub orphan_continuation: usize,
    pub missing_identity: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.blank
            + self.missing_specification
            + self.note_row
            + self.orphan_continuation
            + self.missing_identity
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// Non-empty lines after the header.
    pub total_rows: usize,
    pub projects_created: usize,
    pub configurations_created: usize,
    pub error_count: usize,
    pub skipped: SkipCounts,
    pub unmapped_headers: Vec<String>,
    pub delimiter: String,
    pub source_sha256: String,
}

/// The sole output of a parse run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub projects: Vec<Project>,
    pub configurations: Vec<UnitConfiguration>,
    pub errors: Vec<ParseError>,
    pub stats: ParseStats,
}
