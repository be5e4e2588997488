//! Decides, per row, whether it opens a project, continues the previous one,
//! or carries nothing usable.
//!
//! Broker sheets list a project once and leave its identifying columns blank
//! on the rows that follow. The filter carries the last accepted anchor row
//! forward so those rows can be re-attached. The grouping is only recovered
//! when continuation rows come after their anchor; a continuation row always
//! binds to the most recent anchor, whatever sits in between.

use serde::{Deserialize, Serialize};

use crate::domain::RawRow;
use crate::ingest::headers::CanonicalField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// Nothing but whitespace and delimiters.
    Blank,
    MissingSpecification,
    /// Specification is a parenthesized annotation such as "(Phase 2 towers)".
    NoteRow,
    /// Continuation-shaped row with no earlier project to attach to.
    OrphanContinuation,
    /// Builder, project name or location still empty after inheritance.
    MissingIdentity,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Blank => "blank",
            SkipReason::MissingSpecification => "missing_specification",
            SkipReason::NoteRow => "note_row",
            SkipReason::OrphanContinuation => "orphan_continuation",
            SkipReason::MissingIdentity => "missing_identity",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowDecision {
    /// The row is valid. `row` has inherited fields filled in.
    Accept { row: RawRow, continuation: bool },
    Skip(SkipReason),
}

/// Fields a continuation row may inherit.
const INHERITED_WHEN_EMPTY: [CanonicalField; 4] = [
    CanonicalField::SalesPerson,
    CanonicalField::Location,
    CanonicalField::LandParcel,
    CanonicalField::LaunchDate,
];

/// Identifying values of the last row that opened or named a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub builder: String,
    pub project_name: String,
    pub sales_person: String,
    pub location: String,
    pub land_parcel: String,
    pub launch_date: String,
}

impl Anchor {
    fn from_row(row: &RawRow) -> Self {
        Self {
            builder: row.get(CanonicalField::Builder).to_string(),
            project_name: row.get(CanonicalField::ProjectName).to_string(),
            sales_person: row.get(CanonicalField::SalesPerson).to_string(),
            location: row.get(CanonicalField::Location).to_string(),
            land_parcel: row.get(CanonicalField::LandParcel).to_string(),
            launch_date: row.get(CanonicalField::LaunchDate).to_string(),
        }
    }

    fn value(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Builder => &self.builder,
            CanonicalField::ProjectName => &self.project_name,
            CanonicalField::SalesPerson => &self.sales_person,
            CanonicalField::Location => &self.location,
            CanonicalField::LandParcel => &self.land_parcel,
            CanonicalField::LaunchDate => &self.launch_date,
            _ => "",
        }
    }
}

/// True for specifications like "(Aura heights / Iris Riverside)".
pub fn is_note(specification: &str) -> bool {
    specification.len() >= 2 && specification.starts_with('(') && specification.ends_with(')')
}

/// Classify one row against the current anchor. Pure; the anchor is not
/// advanced here.
pub fn classify(mut row: RawRow, anchor: Option<&Anchor>) -> RowDecision {
    if row.is_blank() {
        return RowDecision::Skip(SkipReason::Blank);
    }

    let specification = row.get(CanonicalField::Specification);
    if specification.is_empty() {
        return RowDecision::Skip(SkipReason::MissingSpecification);
    }
    if is_note(specification) {
        return RowDecision::Skip(SkipReason::NoteRow);
    }

    let continuation =
        row.is_empty(CanonicalField::Builder) && row.is_empty(CanonicalField::ProjectName);
    if continuation {
        let Some(anchor) = anchor else {
            return RowDecision::Skip(SkipReason::OrphanContinuation);
        };
        row.set(CanonicalField::Builder, anchor.builder.as_str());
        row.set(CanonicalField::ProjectName, anchor.project_name.as_str());
        for field in INHERITED_WHEN_EMPTY {
            if row.is_empty(field) {
                row.set(field, anchor.value(field));
            }
        }
    }

    let identified = [
        CanonicalField::Builder,
        CanonicalField::ProjectName,
        CanonicalField::Location,
    ]
    .into_iter()
    .all(|field| !row.is_empty(field));
    if !identified {
        return RowDecision::Skip(SkipReason::MissingIdentity);
    }

    RowDecision::Accept { row, continuation }
}

/// Threads the anchor through a sequence of rows.
#[derive(Debug, Default)]
pub struct ContinuationFilter {
    anchor: Option<Anchor>,
}

impl ContinuationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn decide(&self, row: RawRow) -> RowDecision {
        classify(row, self.anchor.as_ref())
    }

    /// Make an accepted, self-identified row the anchor for the rows after
    /// it, whether or not its values later normalize cleanly.
    pub fn advance(&mut self, row: &RawRow) {
        self.anchor = Some(Anchor::from_row(row));
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

    /// Decide, and advance the anchor the way the parse loop does.
    fn feed(filter: &mut ContinuationFilter, row: RawRow) -> RowDecision {
        let decision = filter.decide(row);
        if let RowDecision::Accept { row, continuation: false } = &decision {
            filter.advance(row);
        }
        decision
    }

    fn anchor_row() -> RawRow {
        row(&[
            (CanonicalField::Builder, "B"),
            (CanonicalField::ProjectName, "P"),
            (CanonicalField::Location, "L"),
            (CanonicalField::SalesPerson, "Ravi 9876543210"),
            (CanonicalField::LandParcel, "4 acres"),
            (CanonicalField::Specification, "2BHK"),
        ])
    }

    #[test]
    fn test_blank_row_is_skipped() {
        let mut filter = ContinuationFilter::new();
        assert_eq!(feed(&mut filter, RawRow::new()), RowDecision::Skip(SkipReason::Blank));
    }

    #[test]
    fn test_missing_specification_is_skipped() {
        let mut filter = ContinuationFilter::new();
        let r = row(&[(CanonicalField::Builder, "B"), (CanonicalField::ProjectName, "P")]);
        assert_eq!(feed(&mut filter, r), RowDecision::Skip(SkipReason::MissingSpecification));
    }

    #[test]
    fn test_note_row_is_skipped() {
        let mut filter = ContinuationFilter::new();
        feed(&mut filter, anchor_row());
        let r = row(&[(CanonicalField::Specification, "(Aura heights / Iris Riverside)")]);
        assert_eq!(feed(&mut filter, r), RowDecision::Skip(SkipReason::NoteRow));
        assert!(!is_note("("));
        assert!(!is_note("(2BHK"));
    }

    #[test]
    fn test_orphan_continuation_is_skipped() {
        let mut filter = ContinuationFilter::new();
        let r = row(&[(CanonicalField::Specification, "3BHK")]);
        assert_eq!(feed(&mut filter, r), RowDecision::Skip(SkipReason::OrphanContinuation));
        assert!(filter.anchor().is_none());
    }

    #[test]
    fn test_continuation_inherits_identity() {
        let mut filter = ContinuationFilter::new();
        assert!(matches!(
            feed(&mut filter, anchor_row()),
            RowDecision::Accept { continuation: false, .. }
        ));

        let r = row(&[
            (CanonicalField::Specification, "3BHK"),
            (CanonicalField::LandParcel, "6 acres"),
        ]);
        match feed(&mut filter, r) {
            RowDecision::Accept { row, continuation } => {
                assert!(continuation);
                assert_eq!(row.get(CanonicalField::Builder), "B");
                assert_eq!(row.get(CanonicalField::ProjectName), "P");
                assert_eq!(row.get(CanonicalField::Location), "L");
                assert_eq!(row.get(CanonicalField::SalesPerson), "Ravi 9876543210");
                assert_eq!(row.get(CanonicalField::LandParcel), "6 acres");
                assert_eq!(row.get(CanonicalField::Specification), "3BHK");
            }
            other => panic!("expected accept, got {:?}", other),
        }
        assert_eq!(filter.anchor().map(|a| a.project_name.as_str()), Some("P"));
    }

    #[test]
    fn test_partial_identity_is_not_a_continuation() {
        let mut filter = ContinuationFilter::new();
        feed(&mut filter, anchor_row());
        let r = row(&[
            (CanonicalField::Builder, "Other"),
            (CanonicalField::Specification, "1BHK"),
            (CanonicalField::Location, "L"),
        ]);
        assert_eq!(feed(&mut filter, r), RowDecision::Skip(SkipReason::MissingIdentity));
    }

    #[test]
    fn test_missing_location_is_skipped() {
        let mut filter = ContinuationFilter::new();
        let r = row(&[
            (CanonicalField::Builder, "B"),
            (CanonicalField::ProjectName, "P"),
            (CanonicalField::Specification, "2BHK"),
        ]);
        assert_eq!(feed(&mut filter, r), RowDecision::Skip(SkipReason::MissingIdentity));
        assert!(filter.anchor().is_none());
    }

    #[test]
    fn test_new_project_row_moves_anchor() {
        let mut filter = ContinuationFilter::new();
        feed(&mut filter, anchor_row());
        let r = row(&[
            (CanonicalField::Builder, "C"),
            (CanonicalField::ProjectName, "Q"),
            (CanonicalField::Location, "M"),
            (CanonicalField::Specification, "1BHK"),
        ]);
        feed(&mut filter, r);
        assert_eq!(filter.anchor().map(|a| a.builder.as_str()), Some("C"));
        assert_eq!(filter.anchor().map(|a| a.sales_person.as_str()), Some(""));
    }
}
