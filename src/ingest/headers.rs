//! Maps broker column headers onto canonical field names.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    SrNo,
    Builder,
    SalesPerson,
    ProjectName,
    LandParcel,
    Tower,
    Construction,
    Amenities,
    Location,
    Possession,
    LaunchDate,
    Specification,
    Carpet,
    Price,
    Floor,
    Flats,
    TotalUnits,
    Parking,
    Details,
    ImageUrl,
}

impl CanonicalField {
    /// Alias matching order: the first field whose aliases match wins.
    pub const ALL: &'static [CanonicalField] = &[
        CanonicalField::SrNo,
        CanonicalField::Builder,
        CanonicalField::SalesPerson,
        CanonicalField::ProjectName,
        CanonicalField::LandParcel,
        CanonicalField::Tower,
        CanonicalField::Construction,
        CanonicalField::Amenities,
        CanonicalField::Location,
        CanonicalField::Possession,
        CanonicalField::LaunchDate,
        CanonicalField::Specification,
        CanonicalField::Carpet,
        CanonicalField::Price,
        CanonicalField::Floor,
        CanonicalField::Flats,
        CanonicalField::TotalUnits,
        CanonicalField::Parking,
        CanonicalField::Details,
        CanonicalField::ImageUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::SrNo => "srNo",
            CanonicalField::Builder => "builder",
            CanonicalField::SalesPerson => "salesPerson",
            CanonicalField::ProjectName => "projectName",
            CanonicalField::LandParcel => "landParcel",
            CanonicalField::Tower => "tower",
            CanonicalField::Construction => "construction",
            CanonicalField::Amenities => "amenities",
            CanonicalField::Location => "location",
            CanonicalField::Possession => "possession",
            CanonicalField::LaunchDate => "launchDate",
            CanonicalField::Specification => "specification",
            CanonicalField::Carpet => "carpet",
            CanonicalField::Price => "price",
            CanonicalField::Floor => "floor",
            CanonicalField::Flats => "flats",
            CanonicalField::TotalUnits => "totalUnits",
            CanonicalField::Parking => "parking",
            CanonicalField::Details => "details",
            CanonicalField::ImageUrl => "imageUrl",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::SrNo => &["sr no", "sr. no.", "s.no", "sno", "serial no", "serial number", "sl no", "#"],
            CanonicalField::Builder => &["builder", "builders", "builder name", "developer", "developer name"],
            CanonicalField::SalesPerson => &[
                "sales person",
                "salesperson",
                "sales person name",
                "sales person & contact",
                "sales person name & number",
                "sales contact",
                "contact person",
                "contact",
                "sales manager",
            ],
            CanonicalField::ProjectName => &["project name", "project", "projects", "name of project", "project title"],
            CanonicalField::LandParcel => &["land parcel", "land parcel (acres)", "land area", "land", "acres", "plot area"],
            CanonicalField::Tower => &["tower", "towers", "tower name", "no. of towers", "wing", "wings", "block"],
            CanonicalField::Construction => &["construction", "construction status", "construction type", "structure", "storeys"],
            CanonicalField::Amenities => &["amenities", "amenity", "facilities", "features"],
            CanonicalField::Location => &["location", "area", "locality", "address", "project location", "city"],
            CanonicalField::Possession => &["possession", "possession date", "possession status", "rera possession", "completion"],
            CanonicalField::LaunchDate => &["launch date", "launch", "launched on", "launch month"],
            CanonicalField::Specification => &[
                "specification",
                "specifications",
                "spec",
                "configuration",
                "config",
                "bhk",
                "unit type",
                "typology",
                "type",
            ],
            CanonicalField::Carpet => &[
                "carpet",
                "carpet area",
                "carpet area (sq ft)",
                "carpet area (sq. ft.)",
                "carpet area sqft",
                "rera carpet",
                "rera carpet area",
                "size",
            ],
            CanonicalField::Price => &[
                "price",
                "prices",
                "price range",
                "price (in lakhs)",
                "cost",
                "all inclusive price",
                "agreement value",
                "budget",
            ],
            CanonicalField::Floor => &["floor", "floors", "floor range", "no. of floors", "total floors"],
            CanonicalField::Flats => &["flats", "flats per floor", "flat per floor", "units per floor"],
            CanonicalField::TotalUnits => &["total units", "units", "no. of units", "total flats", "inventory"],
            CanonicalField::Parking => &["parking", "car parking", "parking type"],
            CanonicalField::Details => &["details", "remarks", "remark", "notes", "comments", "other details", "status"],
            CanonicalField::ImageUrl => &["image url", "image urls", "image", "images", "image link", "photo", "photos"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized aliases per field, in matching order.
static ALIAS_TABLE: Lazy<Vec<(CanonicalField, Vec<String>)>> = Lazy::new(|| {
    CanonicalField::ALL
        .iter()
        .map(|field| {
            let aliases = field.aliases().iter().map(|a| normalize_header(a)).collect();
            (*field, aliases)
        })
        .collect()
});

/// Lower-cases and drops whitespace, `_`, `-`, `/`, `.`, `(` and `)`.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !c.is_whitespace() && !matches!(c, '_' | '-' | '/' | '.' | '(' | ')'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Exact match of the normalized header against the alias table.
pub fn resolve_header(raw: &str) -> Option<CanonicalField> {
    let normalized = normalize_header(raw);
    if normalized.is_empty() {
        return None;
    }
    ALIAS_TABLE
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| *alias == normalized))
        .map(|(field, _)| *field)
}

/// What a header column resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSlot {
    Mapped(CanonicalField),
    /// Lower-cased, trimmed original header text.
    Unmapped(String),
}

/// Column position to canonical field mapping for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    slots: Vec<HeaderSlot>,
}

impl HeaderMap {
    pub fn slots(&self) -> &[HeaderSlot] {
        &self.slots
    }

    pub fn field_at(&self, position: usize) -> Option<CanonicalField> {
        match self.slots.get(position) {
            Some(HeaderSlot::Mapped(field)) => Some(*field),
            _ => None,
        }
    }

    /// Non-empty header names that matched no alias.
    pub fn unmapped(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                HeaderSlot::Unmapped(name) if !name.is_empty() => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Resolve each raw header token to its canonical field.
pub fn resolve_headers(tokens: &[String]) -> HeaderMap {
    let slots = tokens
        .iter()
        .map(|raw| {
            let raw = raw.trim().trim_start_matches('\u{feff}');
            match resolve_header(raw) {
                Some(field) => HeaderSlot::Mapped(field),
                None => HeaderSlot::Unmapped(raw.to_lowercase()),
            }
        })
        .collect();
    HeaderMap { slots }
}
