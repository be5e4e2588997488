//! Turns accepted rows into projects and unit configurations.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::constants::DEFAULT_TOWER_SLUG;
use crate::domain::{PriceRange, Project, RawRow, UnitConfiguration};
use crate::error::RowError;
use crate::ingest::headers::CanonicalField;
use crate::ingest::normalize::{
    infer_status, parse_amenities, parse_carpet_areas, parse_contact, parse_image_urls,
    parse_price, parse_total_units,
};

/// Lower-case, alphanumeric runs joined by single hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn check_price(price: &PriceRange) -> Result<(), RowError> {
    for bound in [price.min, price.max] {
        if !bound.is_finite() {
            return Err(RowError::NonFinite {
                field: "price",
                value: price.original_format.clone(),
            });
        }
    }
    if price.min > price.max {
        return Err(RowError::InvertedPriceRange {
            min: price.min,
            max: price.max,
        });
    }
    Ok(())
}

fn check_areas(areas: &[f64], raw: &str) -> Result<(), RowError> {
    if areas.iter().any(|area| !area.is_finite()) {
        return Err(RowError::NonFinite {
            field: "carpet",
            value: raw.to_string(),
        });
    }
    Ok(())
}

/// Project key: builder and project name exactly as written.
type ProjectKey = (String, String);

#[derive(Debug, Default)]
pub struct Aggregator {
    projects: Vec<Project>,
    configurations: Vec<UnitConfiguration>,
    by_key: HashMap<ProjectKey, usize>,
    project_ids: HashSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[cfg(test)]
    pub fn configurations(&self) -> &[UnitConfiguration] {
        &self.configurations
    }

    /// Add an accepted row. `row` carries inherited values; `original` is the
    /// row as read, kept on the configuration for traceability. Nothing is
    /// registered when the row's numeric fields fail validation.
    pub fn add(&mut self, row: &RawRow, original: RawRow) -> Result<(), RowError> {
        let price = parse_price(row.get(CanonicalField::Price));
        check_price(&price)?;
        let carpet_raw = row.get(CanonicalField::Carpet);
        let carpet_areas = parse_carpet_areas(carpet_raw);
        check_areas(&carpet_areas, carpet_raw)?;

        let key: ProjectKey = (
            row.get(CanonicalField::Builder).to_string(),
            row.get(CanonicalField::ProjectName).to_string(),
        );
        let project_id = match self.by_key.get(&key) {
            Some(&index) => self.projects[index].project_id.clone(),
            None => self.register_project(key, row).project_id.clone(),
        };

        let specification = row.get(CanonicalField::Specification).to_string();
        let tower = row.optional(CanonicalField::Tower);
        let tower_slug = tower
            .as_deref()
            .map(slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| DEFAULT_TOWER_SLUG.to_string());
        let config_id = format!("{}_{}_{}", project_id, slugify(&specification), tower_slug);

        let configuration = UnitConfiguration {
            config_id,
            project_id,
            specification,
            tower,
            floor: row.optional(CanonicalField::Floor),
            flats_per_floor: row.optional(CanonicalField::Flats),
            construction: row.optional(CanonicalField::Construction),
            parking: row.optional(CanonicalField::Parking),
            possession: row.optional(CanonicalField::Possession),
            details: row.optional(CanonicalField::Details),
            carpet_areas,
            price_range: price,
            total_units: parse_total_units(row.get(CanonicalField::TotalUnits)),
            amenities: parse_amenities(row.get(CanonicalField::Amenities)),
            image_urls: parse_image_urls(row.get(CanonicalField::ImageUrl)),
            status: infer_status(row.get(CanonicalField::Details)),
            raw_csv_row: original,
        };
        self.configurations.push(configuration);
        Ok(())
    }

    fn register_project(&mut self, key: ProjectKey, row: &RawRow) -> &Project {
        let base = format!("{}_{}", slugify(&key.0), slugify(&key.1));
        let mut project_id = base.clone();
        let mut suffix = 2;
        while self.project_ids.contains(&project_id) {
            project_id = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        debug!(project_id = %project_id, builder = %key.0, project = %key.1, "registering project");

        let contact = parse_contact(row.get(CanonicalField::SalesPerson));
        let project = Project {
            project_id: project_id.clone(),
            project_name: key.1.clone(),
            builder: key.0.clone(),
            location: row.get(CanonicalField::Location).to_string(),
            land_parcel: row.optional(CanonicalField::LandParcel),
            tower_count: row.optional(CanonicalField::Tower),
            launch_date: row.optional(CanonicalField::LaunchDate),
            expected_possession: row.optional(CanonicalField::Possession),
            details: row.optional(CanonicalField::Details),
            sales_person_name: contact.name,
            sales_person_phone: contact.phone,
        };

        self.project_ids.insert(project_id);
        self.by_key.insert(key, self.projects.len());
        self.projects.push(project);
        &self.projects[self.projects.len() - 1]
    }

    pub fn into_parts(self) -> (Vec<Project>, Vec<UnitConfiguration>) {
        (self.projects, self.configurations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(CanonicalField, &str)]) -> RawRow {
        let mut row = RawRow::new();
        for (field, value) in pairs {
            row.set(*field, *value);
        }
        row
    }

    fn listing(builder: &str, project: &str, spec: &str) -> RawRow {
        row(&[
            (CanonicalField::Builder, builder),
            (CanonicalField::ProjectName, project),
            (CanonicalField::Location, "Baner"),
            (CanonicalField::Specification, spec),
        ])
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Kolte Patil"), "kolte-patil");
        assert_eq!(slugify("Life Republic (Phase 2)"), "life-republic-phase-2");
        assert_eq!(slugify("  Rock & Roll  "), "rock-roll");
        assert_eq!(slugify("--"), "");
    }

    #[test]
    fn test_one_project_per_key() {
        let mut agg = Aggregator::new();
        agg.add(&listing("Acme", "Skyline", "2BHK"), RawRow::new()).unwrap();
        agg.add(&listing("Acme", "Skyline", "3 BHK"), RawRow::new()).unwrap();
        assert_eq!(agg.projects().len(), 1);
        assert_eq!(agg.projects()[0].project_id, "acme_skyline");
        assert_eq!(agg.configurations().len(), 2);
        assert_eq!(agg.configurations()[1].config_id, "acme_skyline_3-bhk_default");
        assert_eq!(agg.configurations()[1].project_id, "acme_skyline");
    }

    #[test]
    fn test_first_seen_values_win() {
        let mut agg = Aggregator::new();
        let mut first = listing("Acme", "Skyline", "2BHK");
        first.set(CanonicalField::SalesPerson, "Ravi - 9876543210");
        first.set(CanonicalField::Possession, "Dec 2026");
        agg.add(&first, RawRow::new()).unwrap();

        let mut second = listing("Acme", "Skyline", "3BHK");
        second.set(CanonicalField::Location, "Wakad");
        second.set(CanonicalField::Possession, "Mar 2027");
        agg.add(&second, RawRow::new()).unwrap();

        let project = &agg.projects()[0];
        assert_eq!(project.location, "Baner");
        assert_eq!(project.expected_possession.as_deref(), Some("Dec 2026"));
        assert_eq!(project.sales_person_name, "Ravi");
        assert_eq!(project.sales_person_phone, "9876543210");
        assert_eq!(agg.configurations()[1].possession.as_deref(), Some("Mar 2027"));
    }

    #[test]
    fn test_case_distinct_keys_get_unique_ids() {
        let mut agg = Aggregator::new();
        agg.add(&listing("ABC Corp", "Vista", "2BHK"), RawRow::new()).unwrap();
        agg.add(&listing("abc corp", "Vista", "2BHK"), RawRow::new()).unwrap();
        assert_eq!(agg.projects().len(), 2);
        assert_eq!(agg.projects()[0].project_id, "abc-corp_vista");
        assert_eq!(agg.projects()[1].project_id, "abc-corp_vista-2");
        assert_eq!(agg.configurations()[1].project_id, "abc-corp_vista-2");
    }

    #[test]
    fn test_configuration_fields_are_normalized() {
        let mut agg = Aggregator::new();
        let mut r = listing("Acme", "Skyline", "2BHK");
        r.set(CanonicalField::Tower, "Tower A");
        r.set(CanonicalField::Carpet, "863, 887");
        r.set(CanonicalField::Price, "90L - 1.1 Cr");
        r.set(CanonicalField::TotalUnits, "240");
        r.set(CanonicalField::Amenities, "all amenities");
        r.set(CanonicalField::ImageUrl, "https://img.example.com/a.jpg|brochure.pdf");
        r.set(CanonicalField::Details, "Tower B sold out");
        agg.add(&r, r.clone()).unwrap();

        let config = &agg.configurations()[0];
        assert_eq!(config.config_id, "acme_skyline_2bhk_tower-a");
        assert_eq!(config.carpet_areas, vec![863.0, 887.0]);
        assert_eq!((config.price_range.min, config.price_range.max), (90.0, 110.0));
        assert_eq!(config.total_units, 240);
        assert_eq!(config.amenities, vec!["All Amenities"]);
        assert_eq!(config.image_urls, vec!["https://img.example.com/a.jpg"]);
        assert_eq!(config.status, crate::domain::UnitStatus::SoldOut);
        assert_eq!(config.raw_csv_row.get(CanonicalField::Tower), "Tower A");
        assert_eq!(config.flats_per_floor, None);
    }

    #[test]
    fn test_overflowing_price_is_a_row_error() {
        let mut agg = Aggregator::new();
        let mut r = listing("Acme", "Skyline", "2BHK");
        r.set(CanonicalField::Price, &"9".repeat(400));
        let err = agg.add(&r, RawRow::new()).unwrap_err();
        assert_eq!(err.field(), "price");
        assert!(agg.projects().is_empty());
        assert!(agg.configurations().is_empty());
    }

    #[test]
    fn test_overflowing_carpet_is_a_row_error() {
        let mut agg = Aggregator::new();
        let mut r = listing("Acme", "Skyline", "2BHK");
        r.set(CanonicalField::Carpet, &format!("650, {}", "9".repeat(400)));
        let err = agg.add(&r, RawRow::new()).unwrap_err();
        assert_eq!(err.field(), "carpet");
    }
}
